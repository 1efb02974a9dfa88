use sqlx::PgPool;

use crate::db::queries;
use crate::error::{AppError, Result};
use crate::models::{ChatMessage, ChatThread, ReportStatus, SessionUser};

/// Chat flow around matched reports. Every operation here is protected;
/// guests are rejected up front.
pub struct ChatService {
    pool: PgPool,
}

impl ChatService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Explicit chat-start action, separate from submission: moves the report
    /// to chat-ongoing and lazily creates the thread keyed by the report id.
    /// Idempotent when a chat is already ongoing.
    pub async fn start_chat(
        &self,
        user: Option<&SessionUser>,
        report_id: i64,
    ) -> Result<ChatThread> {
        SessionUser::require(user)?;

        let report = queries::get_report(&self.pool, report_id)
            .await?
            .ok_or(AppError::ReportNotFound(report_id))?;

        if report.status != ReportStatus::ChatOngoing {
            if !report.status.can_become(ReportStatus::ChatOngoing) {
                return Err(AppError::InvalidTransition {
                    id: report_id,
                    from: report.status,
                    to: ReportStatus::ChatOngoing,
                });
            }
            queries::set_status(&self.pool, report_id, ReportStatus::ChatOngoing).await?;
            tracing::info!("report {} moved to chat-ongoing", report_id);
        }

        if let Some(thread) = queries::get_thread(&self.pool, report_id).await? {
            return Ok(thread);
        }

        let item_type = format!("{} {}", report.kind.label(), report.category);
        // Counterpart identity is not persisted; the thread carries only a
        // display label.
        let thread =
            queries::insert_thread(&self.pool, report_id, "Match User", &item_type, "Chat started")
                .await?;
        tracing::info!("chat thread created for report {}", report_id);
        Ok(thread)
    }

    pub async fn threads(&self, user: Option<&SessionUser>) -> Result<Vec<ChatThread>> {
        SessionUser::require(user)?;
        Ok(queries::list_threads(&self.pool).await?)
    }

    /// Opening a thread clears its unread flag and returns the backlog.
    pub async fn open_thread(
        &self,
        user: Option<&SessionUser>,
        report_id: i64,
    ) -> Result<(ChatThread, Vec<ChatMessage>)> {
        SessionUser::require(user)?;

        let thread = queries::get_thread(&self.pool, report_id)
            .await?
            .ok_or(AppError::ThreadNotFound(report_id))?;
        queries::mark_thread_read(&self.pool, report_id).await?;
        let messages = queries::list_messages(&self.pool, report_id).await?;
        Ok((thread, messages))
    }

    pub async fn send_message(
        &self,
        user: Option<&SessionUser>,
        report_id: i64,
        body: &str,
    ) -> Result<ChatMessage> {
        let user = SessionUser::require(user)?;
        if body.trim().is_empty() {
            return Err(AppError::MissingField("body"));
        }

        queries::get_thread(&self.pool, report_id)
            .await?
            .ok_or(AppError::ThreadNotFound(report_id))?;

        let message = queries::insert_message(&self.pool, report_id, &user.id, body).await?;
        queries::touch_thread(&self.pool, report_id, body).await?;
        Ok(message)
    }
}
