use crate::api::session_user;
use crate::error::AppError;
use crate::models::{ChatMessage, ChatThread, Notification, Report, ReportDraft};
use crate::service::{
    ChatService, ScoredMatch, StorageService, SubmissionOutcome, SubmissionService,
};
use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Submission response: which branch the flow took, plus the scored matches
/// when there are any.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub outcome: &'static str,
    pub message: String,
    pub report: Report,
    pub matches: Vec<ScoredMatch>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub thread: ChatThread,
    pub messages: Vec<ChatMessage>,
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn submit_report(
    State(service): State<Arc<SubmissionService>>,
    headers: HeaderMap,
    Json(draft): Json<ReportDraft>,
) -> Result<Response, AppError> {
    let user = session_user(&headers);
    let response = match service.submit(user.as_ref(), draft).await? {
        SubmissionOutcome::Matched { report, matches } => SubmitResponse {
            success: true,
            outcome: "matched",
            message: format!("{} potential match(es) found", matches.len()),
            report,
            matches,
        },
        SubmissionOutcome::NoMatch { report } => SubmitResponse {
            success: true,
            outcome: "no-match",
            message: "No match found yet".to_string(),
            report,
            matches: Vec::new(),
        },
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Report history, newest first. Open to guests.
pub async fn list_reports(
    State(service): State<Arc<SubmissionService>>,
) -> Result<Json<Vec<Report>>, AppError> {
    Ok(Json(service.history().await?))
}

pub async fn delete_report(
    State(service): State<Arc<SubmissionService>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = session_user(&headers);
    service.delete(user.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_notifications(
    State(service): State<Arc<SubmissionService>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Notification>>, AppError> {
    let user = session_user(&headers);
    Ok(Json(service.notifications(user.as_ref()).await?))
}

pub async fn start_chat(
    State(service): State<Arc<ChatService>>,
    Path(report_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ChatThread>, AppError> {
    let user = session_user(&headers);
    Ok(Json(service.start_chat(user.as_ref(), report_id).await?))
}

pub async fn list_threads(
    State(service): State<Arc<ChatService>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ChatThread>>, AppError> {
    let user = session_user(&headers);
    Ok(Json(service.threads(user.as_ref()).await?))
}

/// Opens the thread (clearing its unread flag) and returns the backlog.
pub async fn open_thread(
    State(service): State<Arc<ChatService>>,
    Path(report_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ThreadResponse>, AppError> {
    let user = session_user(&headers);
    let (thread, messages) = service.open_thread(user.as_ref(), report_id).await?;
    Ok(Json(ThreadResponse { thread, messages }))
}

pub async fn send_message(
    State(service): State<Arc<ChatService>>,
    Path(report_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SendMessageRequest>,
) -> Result<Response, AppError> {
    let user = session_user(&headers);
    let message = service
        .send_message(user.as_ref(), report_id, &req.body)
        .await?;
    Ok((StatusCode::CREATED, Json(message)).into_response())
}

/// Timestamped JSON snapshot of all reports and chats, served as a download.
pub async fn export_data(
    State(service): State<Arc<StorageService>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = session_user(&headers);
    let document = service.export(user.as_ref()).await?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());
    Ok((
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(document),
    )
        .into_response())
}

pub async fn clear_storage(
    State(service): State<Arc<StorageService>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = session_user(&headers);
    service.clear(user.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}
