use crate::app::App;
use crate::cli::{ListArgs, TransactionArgs, UpdateArgs};
use crate::error::FintrackError;
use crate::output::{PageJson, Report, render_page, transaction_detail};
use crate::prompt::Prompt;

use client_core::Route;
use client_core::notify::Notifier;
use client_core::screens;
use client_core::view::{CollectionSource, CollectionView, FetchOutcome};

use common::ErrorLocation;
use models::{TRANSACTION_DATE_FORMAT, TransactionDraft};

use std::panic::Location;

use chrono::Local;
use log::{error, info};
use serde_json::json;
use tokio::io::AsyncBufRead;
use uuid::Uuid;

/// Render whatever the view currently displays.
pub fn page_report<S, N>(view: &CollectionView<S, N>) -> Report
where
    S: CollectionSource<Item = models::Transaction>,
    N: Notifier,
{
    match view.displayed() {
        Some(snapshot) => Report::new(
            render_page(&snapshot.result, &view.pagination()),
            json!(PageJson::new(&snapshot.result, snapshot.query.page())),
        ),
        None => Report::new("No transactions loaded.", json!(null)),
    }
}

#[track_caller]
fn ensure_loaded(outcome: Option<&FetchOutcome>) -> Result<(), FintrackError> {
    match outcome {
        Some(FetchOutcome::Failed) => Err(FintrackError::Core {
            message: String::from("Failed to fetch transactions."),
            location: ErrorLocation::from(Location::caller()),
        }),
        _ => Ok(()),
    }
}

pub async fn list(app: &mut App, args: &ListArgs) -> Result<Report, FintrackError> {
    app.enter(Route::Transactions)?;

    let mut view = app.list_view(args)?;
    ensure_loaded(view.load().await.as_ref())?;

    Ok(page_report(&view))
}

pub async fn show(app: &mut App, id: Uuid) -> Result<Report, FintrackError> {
    app.enter(Route::Transactions)?;

    let transaction = app.client().get_transaction(id).await.map_err(|e| {
        error!("Failed to fetch transaction {id}: {e}");
        FintrackError::from(e)
    })?;

    Ok(Report::new(
        transaction_detail(&transaction).to_string(),
        json!(transaction),
    ))
}

pub async fn create(app: &mut App, args: TransactionArgs) -> Result<Report, FintrackError> {
    app.enter(Route::CreateTransaction)?;

    let date = args
        .date
        .unwrap_or_else(|| Local::now().date_naive().format(TRANSACTION_DATE_FORMAT).to_string());

    let draft = TransactionDraft::builder()
        .with_amount(args.amount)
        .with_category(args.category)
        .with_description(args.description)
        .with_is_income(args.income)
        .with_date(date)
        .build()?;

    let (client, notifier, history) = app.client_and_history();
    let created = screens::submit_create(client, &draft, notifier, history).await?;

    info!("Created transaction {}", created.id);
    Ok(Report::new(
        format!("Created transaction {}", created.id),
        json!(created),
    ))
}

pub async fn update(app: &mut App, id: Uuid, fields: UpdateArgs) -> Result<Report, FintrackError> {
    app.enter(Route::UpdateTransaction(id))?;

    let (client, notifier, history) = app.client_and_history();
    let mut builder = screens::load_for_update(client, id, notifier).await?;

    if let Some(amount) = fields.amount {
        builder = builder.with_amount(amount);
    }
    if let Some(category) = fields.category {
        builder = builder.with_category(category);
    }
    if let Some(description) = fields.description {
        builder = builder.with_description(description);
    }
    if let Some(income) = fields.income {
        builder = builder.with_is_income(income);
    }
    if let Some(date) = fields.date {
        builder = builder.with_date(date);
    }
    let draft = builder.build()?;

    let updated = screens::submit_update(client, id, &draft, notifier, history).await?;

    Ok(Report::new(
        transaction_detail(&updated).to_string(),
        json!(updated),
    ))
}

/// Delete after confirmation, then show the refetched page.
pub async fn delete<R: AsyncBufRead + Unpin>(
    app: &mut App,
    id: Uuid,
    yes: bool,
    args: &ListArgs,
    prompt: &mut Prompt<R>,
) -> Result<Report, FintrackError> {
    app.enter(Route::Transactions)?;

    if !yes && !prompt.confirm(&format!("Are you sure? Delete transaction {id}?")).await? {
        return Err(FintrackError::Cancelled {
            message: String::from("Delete cancelled"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // A failed refetch after a successful delete is reported by the view's
    // notification; the command itself still succeeded.
    let mut view = app.list_view(args)?;
    view.delete(&id).await?;

    Ok(page_report(&view))
}
