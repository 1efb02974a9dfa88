use chrono::Utc;
use sqlx::PgPool;

use crate::db::queries;
use crate::error::Result;
use crate::models::{ExportDocument, SessionUser};

/// Storage-management actions from the profile screen: export the full
/// report/chat snapshot and wipe everything.
pub struct StorageService {
    pool: PgPool,
}

impl StorageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Assemble the timestamped export document. Read-only snapshot; the
    /// download itself happens client-side.
    pub async fn export(&self, user: Option<&SessionUser>) -> Result<ExportDocument> {
        SessionUser::require(user)?;

        let reports = queries::list_reports(&self.pool).await?;
        let chats = queries::list_threads(&self.pool).await?;
        Ok(ExportDocument {
            reports,
            chats,
            export_date: Utc::now(),
        })
    }

    pub async fn clear(&self, user: Option<&SessionUser>) -> Result<()> {
        let user = SessionUser::require(user)?;
        queries::clear_all(&self.pool).await?;
        tracing::info!("all reports, chats and notifications cleared by {}", user.id);
        Ok(())
    }
}
