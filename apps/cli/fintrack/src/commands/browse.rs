//! Interactive paging over the transaction list.

use crate::app::App;
use crate::cli::ListArgs;
use crate::commands::transactions::page_report;
use crate::error::FintrackError;
use crate::notifier::AppNotifier;
use crate::output::Report;
use crate::prompt::Prompt;

use client_core::error::ViewError;
use client_core::view::{CollectionView, FetchOutcome};
use client_core::{ApiClient, Route};

use common::ErrorLocation;

use std::io::Write;
use std::panic::Location;

use log::debug;
use tokio::io::AsyncBufRead;

const HELP: &str = "\
Commands:
  n, next            next page
  p, prev            previous page
  <N>, page <N>      jump to page N
  search <text>      filter (empty text clears the filter)
  size <N>           rows per page
  delete <row>       delete the row numbered <row> on this page
  r, reload          fetch the current page again
  h, help            this text
  q, quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    Next,
    Previous,
    Page(u32),
    Search(String),
    PageSize(u32),
    DeleteRow(usize),
    Reload,
    Help,
    Quit,
}

/// Parse one input line. `Err` carries a message for the user.
pub fn parse_action(line: &str) -> Result<BrowseAction, String> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    let number = |what: &str| -> Result<u32, String> {
        argument
            .parse::<u32>()
            .map_err(|_| format!("'{argument}' is not a valid {what}"))
    };

    match command.to_ascii_lowercase().as_str() {
        "n" | "next" => Ok(BrowseAction::Next),
        "p" | "prev" | "previous" => Ok(BrowseAction::Previous),
        "page" => number("page number").map(BrowseAction::Page),
        "search" | "/" => Ok(BrowseAction::Search(argument.to_string())),
        "clear" => Ok(BrowseAction::Search(String::new())),
        "size" => number("page size").map(BrowseAction::PageSize),
        "delete" | "d" => {
            let row = number("row number")?;
            if row == 0 {
                return Err(String::from("Rows are numbered from 1"));
            }
            Ok(BrowseAction::DeleteRow(row as usize - 1))
        }
        "r" | "reload" => Ok(BrowseAction::Reload),
        "h" | "help" | "?" => Ok(BrowseAction::Help),
        "q" | "quit" | "exit" => Ok(BrowseAction::Quit),
        other => other
            .parse::<u32>()
            .map(BrowseAction::Page)
            .map_err(|_| format!("Unknown command '{other}' (type 'help')")),
    }
}

#[track_caller]
fn write_block<W: Write>(out: &mut W, text: &str) -> Result<(), FintrackError> {
    writeln!(out, "{text}").map_err(|e| FintrackError::Fintrack {
        message: format!("Failed to write output: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

pub async fn run<R, W>(
    app: &mut App,
    args: &ListArgs,
    prompt: &mut Prompt<R>,
    out: &mut W,
) -> Result<Report, FintrackError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    app.enter(Route::Transactions)?;

    let mut view = app.list_view(args)?;
    view.load().await;
    write_block(out, &page_report(&view).text)?;

    while let Some(line) = prompt.ask("browse> ").await? {
        if line.trim().is_empty() {
            continue;
        }

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(message) => {
                write_block(out, &message)?;
                continue;
            }
        };
        debug!("Browse action: {action:?}");

        match apply(&mut view, action, prompt).await? {
            Step::Render => write_block(out, &page_report(&view).text)?,
            Step::Say(message) => write_block(out, &message)?,
            Step::Quit => break,
        }
    }

    let mut report = page_report(&view);
    report.text = String::new();
    Ok(report)
}

enum Step {
    Render,
    Say(String),
    Quit,
}

async fn apply<R: AsyncBufRead + Unpin>(
    view: &mut CollectionView<ApiClient, AppNotifier>,
    action: BrowseAction,
    prompt: &mut Prompt<R>,
) -> Result<Step, FintrackError> {
    let outcome = match action {
        BrowseAction::Next => view.go_to_next().await,
        BrowseAction::Previous => view.go_to_previous().await,
        BrowseAction::Page(page) => view.go_to_page(page).await,
        BrowseAction::Search(term) => view.search(term).await,
        BrowseAction::PageSize(size) => match view.change_page_size(size).await {
            Ok(outcome) => outcome,
            Err(e) => return Ok(Step::Say(FintrackError::from(e).user_message().to_string())),
        },
        BrowseAction::Reload => {
            let ticket = view.refresh();
            Some(view.run(ticket).await)
        }
        BrowseAction::DeleteRow(index) => {
            let id = match view.visible_id(index) {
                Ok(id) => id,
                Err(ViewError::RowNotVisible { message, .. }) => return Ok(Step::Say(message)),
                Err(e) => return Err(e.into()),
            };
            if !prompt.confirm(&format!("Are you sure? Delete transaction {id}?")).await? {
                return Ok(Step::Say(String::from("Delete cancelled")));
            }
            match view.delete(&id).await {
                Ok(outcome) => Some(outcome),
                // The view already raised the error toast and kept its rows
                Err(_) => return Ok(Step::Say(format!("Transaction {id} was not deleted"))),
            }
        }
        BrowseAction::Help => return Ok(Step::Say(HELP.to_string())),
        BrowseAction::Quit => return Ok(Step::Quit),
    };

    Ok(match outcome {
        Some(FetchOutcome::Discarded) => Step::Say(String::from("Response superseded, nothing changed")),
        Some(_) => Step::Render,
        None => Step::Say(String::from("Nothing to do (already there)")),
    })
}
