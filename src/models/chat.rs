use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-report conversation. Created lazily the first time a chat is started
/// for a matched report; keyed by the report id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChatThread {
    pub report_id: i64,
    pub user_name: String,
    pub item_type: String,
    pub last_message: String,
    pub updated_at: DateTime<Utc>,
    pub unread: bool,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub report_id: i64,
    pub sender_id: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}
