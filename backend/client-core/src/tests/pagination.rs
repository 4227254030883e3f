use crate::view::PaginationControls;

/// **VALUE**: Verifies one button per page with only the current one active.
#[test]
fn given_page_2_of_4_when_built_then_both_directions_enabled() {
    let controls = PaginationControls::new(2, 4);

    let active: Vec<bool> = controls.pages.iter().map(|button| button.active).collect();
    assert_eq!(active, vec![false, true, false, false]);
    assert_eq!(controls.active_page(), Some(2));
    assert!(controls.previous_enabled);
    assert!(controls.next_enabled);
}

/// **VALUE**: Verifies a single page disables both directions.
///
/// **BUG THIS CATCHES**: Would catch `next_enabled` computed as `current <= total`.
#[test]
fn given_single_page_when_built_then_no_navigation() {
    let controls = PaginationControls::new(1, 1);

    assert_eq!(controls.pages.len(), 1);
    assert!(!controls.previous_enabled);
    assert!(!controls.next_enabled);
}

/// **VALUE**: Verifies an empty result set renders no buttons at all.
#[test]
fn given_zero_pages_when_built_then_no_buttons() {
    let controls = PaginationControls::new(1, 0);

    assert!(controls.pages.is_empty());
    assert_eq!(controls.active_page(), None);
    assert!(!controls.next_enabled);
    assert_eq!(PaginationControls::empty(), controls);
}
