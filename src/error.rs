use thiserror::Error;

use crate::models::ReportStatus;

/// Failure taxonomy for the service. Every failure is terminal for the
/// current user action; there are no retries anywhere in this crate.
#[derive(Debug, Error)]
pub enum AppError {
    /// Category template validation failed.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The user already owns an opposite-kind report for the same category
    /// and location.
    #[error("you already filed the opposite report for this item at this location")]
    DuplicateReport,

    /// A guest attempted a protected action.
    #[error("login required")]
    AuthRequired,

    #[error("report {0} not found")]
    ReportNotFound(i64),

    #[error("no chat exists for report {0}")]
    ThreadNotFound(i64),

    /// Status may only move forward.
    #[error("report {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: i64,
        from: ReportStatus,
        to: ReportStatus,
    },

    /// Store failure, surfaced verbatim to the caller.
    #[error(transparent)]
    Persistence(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
