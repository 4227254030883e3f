#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: u32,
    pub active: bool,
}

/// Numbered page buttons plus previous/next availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub pages: Vec<PageButton>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let pages = (1..=total_pages)
            .map(|number| PageButton {
                number,
                active: number == current_page,
            })
            .collect();

        Self {
            pages,
            previous_enabled: current_page > 1,
            next_enabled: current_page < total_pages,
        }
    }

    /// No result yet: nothing to click.
    pub fn empty() -> Self {
        Self {
            pages: Vec::new(),
            previous_enabled: false,
            next_enabled: false,
        }
    }

    pub fn active_page(&self) -> Option<u32> {
        self.pages.iter().find(|button| button.active).map(|button| button.number)
    }
}
