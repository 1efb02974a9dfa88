pub mod chat;
pub mod scoring;
pub mod storage;
pub mod submission;

pub use chat::ChatService;
pub use scoring::{is_duplicate, score, DuplicatePolicy, MatchParams};
pub use storage::StorageService;
pub use submission::{ScoredMatch, SubmissionOutcome, SubmissionService};
