//! Text and JSON rendering of command results.

use crate::error::FintrackError;

use client_core::notify::{Notification, NotificationKind};
use client_core::view::{PaginationControls, format_currency};

use common::ErrorLocation;
use models::{ListResult, Transaction};

use std::panic::Location;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { OutputFormat::Json } else { OutputFormat::Text }
    }
}

pub fn transactions_table(transactions: &[Transaction]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(
        ["#", "Amount", "Category", "Description", "Income", "Date", "ID"]
            .iter()
            .map(|header| Cell::new(*header)),
    );

    for (index, transaction) in transactions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(format_currency(transaction.amount)),
            Cell::new(&transaction.category),
            Cell::new(&transaction.description),
            Cell::new(if transaction.is_income { "Yes" } else { "No" }),
            Cell::new(&transaction.date),
            Cell::new(transaction.id),
        ]);
    }

    table
}

/// `« Previous  1  [2]  3  Next »`; a direction is left out when unavailable.
pub fn pager_line(controls: &PaginationControls) -> String {
    if controls.pages.is_empty() {
        return String::from("(no pages)");
    }

    let mut parts = Vec::with_capacity(controls.pages.len() + 2);
    if controls.previous_enabled {
        parts.push(String::from("« Previous"));
    }
    for button in &controls.pages {
        if button.active {
            parts.push(format!("[{}]", button.number));
        } else {
            parts.push(button.number.to_string());
        }
    }
    if controls.next_enabled {
        parts.push(String::from("Next »"));
    }

    parts.join("  ")
}

/// Full text rendering of a list page: table, total and pager.
pub fn render_page(result: &ListResult<Transaction>, controls: &PaginationControls) -> String {
    if result.is_empty() {
        return format!("No transactions found.\n{}", pager_line(controls));
    }

    format!(
        "{}\nTotal: {} ({} transactions)\n{}",
        transactions_table(&result.items),
        format_currency(result.total_amount),
        result.total_items,
        pager_line(controls)
    )
}

pub fn transaction_detail(transaction: &Transaction) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec![Cell::new("ID"), Cell::new(transaction.id)]);
    table.add_row(vec![Cell::new("Amount"), Cell::new(format_currency(transaction.amount))]);
    table.add_row(vec![Cell::new("Category"), Cell::new(&transaction.category)]);
    table.add_row(vec![Cell::new("Description"), Cell::new(&transaction.description)]);
    table.add_row(vec![
        Cell::new("Income"),
        Cell::new(if transaction.is_income { "Yes" } else { "No" }),
    ]);
    table.add_row(vec![Cell::new("Date"), Cell::new(&transaction.date)]);
    table
}

#[derive(Serialize)]
struct NotificationJson<'a> {
    title: &'a str,
    text: &'a str,
    kind: &'static str,
}

fn notification_json(notification: &Notification) -> NotificationJson<'_> {
    NotificationJson {
        title: &notification.title,
        text: &notification.text,
        kind: match notification.kind {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
        },
    }
}

/// JSON envelope: `{"success": true, "data": ..., "notifications": [...]}`.
pub fn success_envelope<T: Serialize>(data: &T, notifications: &[Notification]) -> Result<Value, FintrackError> {
    let data = serde_json::to_value(data).map_err(|e| FintrackError::Fintrack {
        message: format!("Failed to serialize output: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let notifications: Vec<NotificationJson<'_>> = notifications.iter().map(notification_json).collect();

    Ok(json!({
        "success": true,
        "data": data,
        "notifications": notifications,
    }))
}

pub fn error_envelope(error: &FintrackError, notifications: &[Notification]) -> Value {
    let notifications: Vec<NotificationJson<'_>> = notifications.iter().map(notification_json).collect();

    json!({
        "success": false,
        "error": error,
        "notifications": notifications,
    })
}

/// JSON shape of a list page.
#[derive(Serialize)]
pub struct PageJson<'a> {
    pub transactions: &'a [Transaction],
    pub total_amount: f64,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

impl<'a> PageJson<'a> {
    pub fn new(result: &'a ListResult<Transaction>, page: u32) -> Self {
        Self {
            transactions: &result.items,
            total_amount: result.total_amount,
            total: result.total_items,
            page,
            size: result.page_size,
            pages: result.total_pages,
        }
    }
}

pub fn print_json(value: &Value) -> Result<(), FintrackError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| FintrackError::Fintrack {
        message: format!("Failed to serialize output: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    println!("{text}");
    Ok(())
}

/// Result of a command: text for the terminal and data for `--json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    pub data: Value,
}

impl Report {
    pub fn new(text: impl Into<String>, data: Value) -> Self {
        Self {
            text: text.into(),
            data,
        }
    }

    /// Print in the requested format, folding in buffered notifications.
    pub fn emit(&self, format: OutputFormat, notifications: &[Notification]) -> Result<(), FintrackError> {
        match format {
            OutputFormat::Text => {
                if !self.text.is_empty() {
                    println!("{}", self.text);
                }
                Ok(())
            }
            OutputFormat::Json => print_json(&success_envelope(&self.data, notifications)?),
        }
    }
}
