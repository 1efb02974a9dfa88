pub mod handlers;

pub use handlers::*;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::models::SessionUser;

/// Error body shape shared by every failed response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateReport => StatusCode::CONFLICT,
            AppError::AuthRequired => StatusCode::UNAUTHORIZED,
            AppError::ReportNotFound(_) | AppError::ThreadNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Identity claims injected by the auth gateway. Absent or empty id header
/// means the caller is a guest.
pub fn session_user(headers: &HeaderMap) -> Option<SessionUser> {
    let id = header_str(headers, "x-user-id")?;
    Some(SessionUser {
        id,
        email: header_str(headers, "x-user-email").unwrap_or_default(),
        display_name: header_str(headers, "x-user-name").unwrap_or_default(),
        avatar_url: header_str(headers, "x-user-avatar"),
    })
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_header_means_guest() {
        let headers = HeaderMap::new();
        assert!(session_user(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "  ".parse().unwrap());
        assert!(session_user(&headers).is_none());
    }

    #[test]
    fn identity_headers_build_a_session() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "google_42".parse().unwrap());
        headers.insert("x-user-email", "s@university.edu".parse().unwrap());
        headers.insert("x-user-name", "Sam".parse().unwrap());

        let user = session_user(&headers).unwrap();
        assert_eq!(user.id, "google_42");
        assert_eq!(user.email, "s@university.edu");
        assert_eq!(user.display_name, "Sam");
        assert!(user.avatar_url.is_none());
    }
}
