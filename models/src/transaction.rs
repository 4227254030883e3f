use crate::error::model_error::ModelError;

use common::ErrorLocation;

use std::panic::Location;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date format accepted by the API for the `date` field.
pub const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%d";

/// A transaction record as returned by the API.
///
/// Records are replaced wholesale on every fetch; nothing in the client patches
/// individual fields locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "table_name_id", alias = "id")]
    pub id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_income: bool,
    #[serde(default)]
    pub date: String,
}

impl Transaction {
    /// Form payload prefilled from this record (used by the update screen).
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount,
            category: self.category.clone(),
            description: self.description.clone(),
            is_income: self.is_income,
            date: self.date.clone(),
        }
    }
}

/// Body of `POST /transactions` and `PUT /transactions/{id}`.
///
/// Only obtainable through [`TransactionDraftBuilder::build`], so every draft
/// that reaches the API client has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    amount: f64,
    category: String,
    description: String,
    is_income: bool,
    date: String,
}

impl TransactionDraft {
    pub fn builder() -> TransactionDraftBuilder {
        TransactionDraftBuilder::default()
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.is_income
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Start a builder from this draft, used to apply partial edits.
    pub fn to_builder(&self) -> TransactionDraftBuilder {
        TransactionDraftBuilder {
            amount: Some(self.amount),
            category: Some(self.category.clone()),
            description: Some(self.description.clone()),
            is_income: Some(self.is_income),
            date: None,
            stored_date: Some(self.date.clone()),
        }
    }
}

/// Builder for validated [`TransactionDraft`] values.
#[derive(Debug, Default, Clone)]
pub struct TransactionDraftBuilder {
    amount: Option<f64>,
    category: Option<String>,
    description: Option<String>,
    is_income: Option<bool>,
    date: Option<String>,
    /// Date of an existing record. Sent back unchanged and not format-checked,
    /// since the server accepts any text there.
    stored_date: Option<String>,
}

impl TransactionDraftBuilder {
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_is_income(mut self, is_income: bool) -> Self {
        self.is_income = Some(is_income);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Build the draft with validation.
    ///
    /// Description may be empty and `is_income` defaults to false; amount,
    /// category and date are required. A date set through [`with_date`] must
    /// be `YYYY-MM-DD`; a date carried over from an existing record only has
    /// to be non-blank.
    ///
    /// [`with_date`]: TransactionDraftBuilder::with_date
    #[track_caller]
    pub fn build(self) -> Result<TransactionDraft, ModelError> {
        let amount = self.amount.ok_or_else(|| ModelError::Validation {
            message: String::from("Amount is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !amount.is_finite() {
            return Err(ModelError::Validation {
                message: format!("Amount must be a finite number, got {amount}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let category = self.category.ok_or_else(|| ModelError::Validation {
            message: String::from("Category is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let category = category.trim().to_string();
        if category.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Category cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let date = match (self.date, self.stored_date) {
            (Some(date), _) => {
                let date = date.trim().to_string();
                if NaiveDate::parse_from_str(&date, TRANSACTION_DATE_FORMAT).is_err() {
                    return Err(ModelError::Validation {
                        message: format!("Invalid date '{date}', expected YYYY-MM-DD"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                date
            }
            (None, Some(stored)) if !stored.trim().is_empty() => stored,
            _ => {
                return Err(ModelError::Validation {
                    message: String::from("Date is required"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        Ok(TransactionDraft {
            amount,
            category,
            description: self.description.unwrap_or_default(),
            is_income: self.is_income.unwrap_or(false),
            date,
        })
    }
}
