pub mod chat;
pub mod export;
pub mod notification;
pub mod report;
pub mod session;

pub use chat::{ChatMessage, ChatThread};
pub use export::ExportDocument;
pub use notification::{Notification, NotificationKind};
pub use report::{Category, NewReport, Report, ReportDraft, ReportKind, ReportStatus};
pub use session::SessionUser;
