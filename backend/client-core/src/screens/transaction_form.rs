use crate::api_client::ApiClient;
use crate::error::api_client::ApiClientError;
use crate::notify::{Notification, Notifier};
use crate::router::{NavigateOptions, Navigator, Route};

use models::{Transaction, TransactionDraft, TransactionDraftBuilder};

use log::{info, warn};
use uuid::Uuid;

pub async fn submit_create<N: Notifier, R: Navigator>(
    client: &ApiClient,
    draft: &TransactionDraft,
    notifier: &N,
    navigator: &mut R,
) -> Result<Transaction, ApiClientError> {
    match client.create_transaction(draft).await {
        Ok(created) => {
            info!("Created transaction {}", created.id);
            notifier.notify(Notification::success(
                "Transaction Created!",
                "Transaction created successfully!",
            ));
            navigator.navigate(Route::Transactions, NavigateOptions::default());
            Ok(created)
        }
        Err(e) => {
            warn!("Error creating transaction: {e}");
            notifier.notify(Notification::error("Error!", "Failed to create transaction."));
            Err(e)
        }
    }
}

/// Prefill for the update form: the stored transaction as an editable builder.
pub async fn load_for_update<N: Notifier>(
    client: &ApiClient,
    id: Uuid,
    notifier: &N,
) -> Result<TransactionDraftBuilder, ApiClientError> {
    match client.get_transaction(id).await {
        Ok(transaction) => Ok(transaction.to_draft().to_builder()),
        Err(e) => {
            warn!("Error fetching transaction {id}: {e}");
            notifier.notify(Notification::error("Error!", "Failed to fetch transaction."));
            Err(e)
        }
    }
}

pub async fn submit_update<N: Notifier, R: Navigator>(
    client: &ApiClient,
    id: Uuid,
    draft: &TransactionDraft,
    notifier: &N,
    navigator: &mut R,
) -> Result<Transaction, ApiClientError> {
    match client.update_transaction(id, draft).await {
        Ok(updated) => {
            info!("Updated transaction {id}");
            notifier.notify(Notification::success("Updated!", "Transaction updated successfully!"));
            navigator.navigate(Route::Transactions, NavigateOptions::default());
            Ok(updated)
        }
        Err(e) => {
            warn!("Error updating transaction {id}: {e}");
            notifier.notify(Notification::error("Error!", "Failed to update transaction."));
            Err(e)
        }
    }
}
