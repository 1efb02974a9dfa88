use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ChatThread, Report};

/// Snapshot handed to the client-side download: every report and chat thread
/// plus the time the export was assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub reports: Vec<Report>,
    pub chats: Vec<ChatThread>,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    /// Download filename, mirroring the `losthere-data-<millis>.json` scheme.
    pub fn file_name(&self) -> String {
        format!("losthere-data-{}.json", self.export_date.timestamp_millis())
    }
}
