use crate::error::FintrackError;
use crate::output::{PageJson, Report, error_envelope, pager_line, render_page, success_envelope};

use client_core::notify::Notification;
use client_core::view::PaginationControls;

use common::ErrorLocation;
use models::{ListResult, Transaction};

use std::panic::Location;

use serde_json::json;
use uuid::Uuid;

fn transaction(amount: f64, category: &str) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        amount,
        category: category.to_string(),
        description: format!("{category} purchase"),
        is_income: false,
        date: String::from("2026-03-14"),
    }
}

fn page(items: Vec<Transaction>, total_items: u64, total_pages: u32, total_amount: f64) -> ListResult<Transaction> {
    ListResult {
        items,
        page: 2,
        page_size: 9,
        total_pages,
        total_items,
        total_amount,
    }
}

/// **VALUE**: The pager marks the requested page and hides unusable directions.
///
/// **BUG THIS CATCHES**: Would catch Previous being shown on page 1 or Next
/// on the last page, which the list screen never offers.
#[test]
fn given_middle_page_when_rendering_pager_then_both_directions_and_active_marked() {
    let line = pager_line(&PaginationControls::new(2, 3));

    assert_eq!(line, "« Previous  1  [2]  3  Next »");
}

#[test]
fn given_first_of_one_page_when_rendering_pager_then_no_directions() {
    assert_eq!(pager_line(&PaginationControls::new(1, 1)), "[1]");
}

#[test]
fn given_no_result_when_rendering_pager_then_placeholder() {
    assert_eq!(pager_line(&PaginationControls::empty()), "(no pages)");
}

/// **VALUE**: The totals line shows the server's filtered total, not a sum
/// over the rows on screen.
///
/// **BUG THIS CATCHES**: Would catch rendering code summing `items` locally,
/// which shows $30 here instead of the $450 the server reported.
#[test]
fn given_page_with_rows_when_rendered_then_server_total_and_count_shown() {
    // GIVEN: Two rows on page 2 of 3, server total $450 over 25 rows
    let result = page(vec![transaction(10.0, "groceries"), transaction(20.0, "fuel")], 25, 3, 450.0);

    // WHEN: Rendering
    let text = render_page(&result, &PaginationControls::new(2, 3));

    // THEN: Rows, server total and pager all appear
    assert!(text.contains("groceries"));
    assert!(text.contains("fuel"));
    assert!(text.contains("Total: $450 (25 transactions)"), "got:\n{text}");
    assert!(text.ends_with("« Previous  1  [2]  3  Next »"));
}

#[test]
fn given_empty_page_when_rendered_then_no_transactions_message() {
    let result = page(Vec::new(), 0, 0, 0.0);

    let text = render_page(&result, &PaginationControls::new(1, 0));

    assert!(text.starts_with("No transactions found."));
}

#[test]
fn given_list_result_when_converted_to_page_json_then_wire_field_names() {
    let result = page(vec![transaction(12.5, "rent")], 1, 1, 12.5);

    let value = json!(PageJson::new(&result, 1));

    assert_eq!(value["total_amount"], 12.5);
    assert_eq!(value["total"], 1);
    assert_eq!(value["page"], 1);
    assert_eq!(value["size"], 9);
    assert_eq!(value["pages"], 1);
    assert_eq!(value["transactions"][0]["category"], "rent");
    assert!(value["transactions"][0]["table_name_id"].is_string());
}

#[test]
fn given_report_and_notifications_when_enveloped_then_both_included() {
    let report = Report::new("Signed out", json!({ "signed_in": false }));
    let notifications = vec![Notification::success("Deleted!", "Transaction deleted successfully!")];

    let value = success_envelope(&report.data, &notifications).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["signed_in"], false);
    assert_eq!(value["notifications"][0]["kind"], "success");
    assert_eq!(value["notifications"][0]["title"], "Deleted!");
}

#[test]
fn given_error_when_enveloped_then_success_false_with_tagged_error() {
    let err = FintrackError::Cancelled {
        message: String::from("Delete cancelled"),
        location: ErrorLocation::from(Location::caller()),
    };

    let value = error_envelope(&err, &[Notification::error("Error!", "Failed to delete transaction.")]);

    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["type"], "Cancelled");
    assert_eq!(value["notifications"][0]["kind"], "error");
}
