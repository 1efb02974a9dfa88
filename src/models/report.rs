use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Whether a report claims an item was lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "report_kind", rename_all = "lowercase")]
pub enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    /// The kind a candidate report must have to be matchable against this one.
    pub fn opposite(self) -> Self {
        match self {
            ReportKind::Lost => ReportKind::Found,
            ReportKind::Found => ReportKind::Lost,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Lost => "Lost",
            ReportKind::Found => "Found",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Lost => write!(f, "lost"),
            ReportKind::Found => write!(f, "found"),
        }
    }
}

/// Closed set of item categories offered by the report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "item_category", rename_all = "kebab-case")]
pub enum Category {
    Phone,
    Laptop,
    Wallet,
    Keys,
    IdCard,
    Document,
    Clothing,
    Other,
}

impl Category {
    /// Brand and model are load-bearing identifiers only for devices; the
    /// other category templates leave them optional.
    pub fn requires_brand(self) -> bool {
        matches!(self, Category::Phone | Category::Laptop)
    }

    pub fn requires_model(self) -> bool {
        matches!(self, Category::Phone | Category::Laptop)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Category::Phone => "phone",
            Category::Laptop => "laptop",
            Category::Wallet => "wallet",
            Category::Keys => "keys",
            Category::IdCard => "id-card",
            Category::Document => "document",
            Category::Clothing => "clothing",
            Category::Other => "other",
        };
        write!(f, "{}", id)
    }
}

/// Report lifecycle. Transitions only move forward; a completed report never
/// reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "report_status", rename_all = "kebab-case")]
pub enum ReportStatus {
    Pending,
    Matched,
    ChatOngoing,
    Completed,
}

impl ReportStatus {
    fn rank(self) -> u8 {
        match self {
            ReportStatus::Pending => 0,
            ReportStatus::Matched => 1,
            ReportStatus::ChatOngoing => 2,
            ReportStatus::Completed => 3,
        }
    }

    /// Forward-only ordering: pending -> matched -> chat-ongoing -> completed.
    pub fn can_become(self, next: ReportStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Matched => "matched",
            ReportStatus::ChatOngoing => "chat-ongoing",
            ReportStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// A stored lost/found claim. `kind` and `category` are immutable after
/// insertion.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub kind: ReportKind,
    pub category: Category,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub characteristics: String,
    pub location: String,
    pub reported_on: NaiveDate,
    pub photo: Option<String>,
    pub status: ReportStatus,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// Raw submission payload as it arrives from the form. Free-text fields
/// default to empty so absent and empty are indistinguishable downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDraft {
    pub kind: ReportKind,
    pub category: Category,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub characteristics: String,
    #[serde(default)]
    pub location: String,
    pub reported_on: Option<NaiveDate>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl ReportDraft {
    /// Checks the draft against its category template and produces the typed
    /// record the guard and the persistence layer work with.
    pub fn validate(self) -> Result<NewReport, AppError> {
        if self.category.requires_brand() && self.brand.trim().is_empty() {
            return Err(AppError::MissingField("brand"));
        }
        if self.category.requires_model() && self.model.trim().is_empty() {
            return Err(AppError::MissingField("model"));
        }
        if self.color.trim().is_empty() {
            return Err(AppError::MissingField("color"));
        }
        if self.characteristics.trim().is_empty() {
            return Err(AppError::MissingField("characteristics"));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::MissingField("location"));
        }
        let reported_on = self.reported_on.ok_or(AppError::MissingField("reported_on"))?;

        Ok(NewReport {
            kind: self.kind,
            category: self.category,
            brand: self.brand,
            model: self.model,
            color: self.color,
            characteristics: self.characteristics,
            location: self.location,
            reported_on,
            photo: self.photo,
        })
    }
}

/// A submission that passed category validation but has not been persisted.
#[derive(Debug, Clone, Serialize)]
pub struct NewReport {
    pub kind: ReportKind,
    pub category: Category,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub characteristics: String,
    pub location: String,
    pub reported_on: NaiveDate,
    pub photo: Option<String>,
}
