use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identity claims for the current request. Built from gateway-injected
/// headers; absence means the caller is a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl SessionUser {
    /// Guests are rejected before any side effect.
    pub fn require(user: Option<&SessionUser>) -> Result<&SessionUser, AppError> {
        user.ok_or(AppError::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_is_rejected() {
        assert!(matches!(
            SessionUser::require(None),
            Err(AppError::AuthRequired)
        ));
    }

    #[test]
    fn authenticated_user_passes() {
        let user = SessionUser {
            id: "google_123".to_string(),
            email: "student@university.edu".to_string(),
            display_name: "Student".to_string(),
            avatar_url: None,
        };
        assert_eq!(SessionUser::require(Some(&user)).unwrap().id, "google_123");
    }
}
