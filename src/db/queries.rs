use crate::models::{
    Category, ChatMessage, ChatThread, NewReport, Notification, NotificationKind, Report,
    ReportKind, ReportStatus,
};
use sqlx::PgPool;

const REPORT_COLUMNS: &str = "id, kind, category, brand, model, color, characteristics, \
     location, reported_on, photo, status, owner_id, created_at";

/// Insert a validated submission with status = pending and return the stored
/// row, id assigned.
pub async fn insert_report(
    pool: &PgPool,
    new: &NewReport,
    owner_id: &str,
) -> Result<Report, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        r#"
        INSERT INTO reports
            (kind, category, brand, model, color, characteristics,
             location, reported_on, photo, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {REPORT_COLUMNS}
        "#
    ))
    .bind(new.kind)
    .bind(new.category)
    .bind(&new.brand)
    .bind(&new.model)
    .bind(&new.color)
    .bind(&new.characteristics)
    .bind(&new.location)
    .bind(new.reported_on)
    .bind(&new.photo)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

pub async fn get_report(pool: &PgPool, id: i64) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        r#"
        SELECT {REPORT_COLUMNS}
        FROM reports
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Full history, newest first.
pub async fn list_reports(pool: &PgPool) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        r#"
        SELECT {REPORT_COLUMNS}
        FROM reports
        ORDER BY created_at DESC
        "#
    ))
    .fetch_all(pool)
    .await
}

/// Every report the user owns; input to the duplicate guard.
pub async fn list_reports_for_user(
    pool: &PgPool,
    owner_id: &str,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        r#"
        SELECT {REPORT_COLUMNS}
        FROM reports
        WHERE owner_id = $1
        ORDER BY created_at DESC
        "#
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Candidate set for matching: opposite kind, same category, not owned by
/// the submitter. Recomputed fresh per submission.
pub async fn list_candidates(
    pool: &PgPool,
    kind: ReportKind,
    category: Category,
    exclude_owner: &str,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        r#"
        SELECT {REPORT_COLUMNS}
        FROM reports
        WHERE kind = $1
          AND category = $2
          AND owner_id <> $3
        ORDER BY created_at DESC
        "#
    ))
    .bind(kind)
    .bind(category)
    .bind(exclude_owner)
    .fetch_all(pool)
    .await
}

/// Owner-scoped delete; returns the number of rows removed (0 when the
/// report does not exist or belongs to someone else).
pub async fn delete_report(pool: &PgPool, id: i64, owner_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reports WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_status(
    pool: &PgPool,
    id: i64,
    status: ReportStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE reports SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_notification(
    pool: &PgPool,
    recipient_id: &str,
    kind: NotificationKind,
    message: &str,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (recipient_id, kind, message)
        VALUES ($1, $2, $3)
        RETURNING id, recipient_id, kind, message, read, created_at
        "#,
    )
    .bind(recipient_id)
    .bind(kind)
    .bind(message)
    .fetch_one(pool)
    .await
}

pub async fn list_notifications(
    pool: &PgPool,
    recipient_id: &str,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        SELECT id, recipient_id, kind, message, read, created_at
        FROM notifications
        WHERE recipient_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(recipient_id)
    .fetch_all(pool)
    .await
}

pub async fn get_thread(
    pool: &PgPool,
    report_id: i64,
) -> Result<Option<ChatThread>, sqlx::Error> {
    sqlx::query_as::<_, ChatThread>(
        r#"
        SELECT report_id, user_name, item_type, last_message, updated_at, unread
        FROM chat_threads
        WHERE report_id = $1
        "#,
    )
    .bind(report_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_thread(
    pool: &PgPool,
    report_id: i64,
    user_name: &str,
    item_type: &str,
    last_message: &str,
) -> Result<ChatThread, sqlx::Error> {
    sqlx::query_as::<_, ChatThread>(
        r#"
        INSERT INTO chat_threads (report_id, user_name, item_type, last_message)
        VALUES ($1, $2, $3, $4)
        RETURNING report_id, user_name, item_type, last_message, updated_at, unread
        "#,
    )
    .bind(report_id)
    .bind(user_name)
    .bind(item_type)
    .bind(last_message)
    .fetch_one(pool)
    .await
}

pub async fn list_threads(pool: &PgPool) -> Result<Vec<ChatThread>, sqlx::Error> {
    sqlx::query_as::<_, ChatThread>(
        r#"
        SELECT report_id, user_name, item_type, last_message, updated_at, unread
        FROM chat_threads
        ORDER BY updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn mark_thread_read(pool: &PgPool, report_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE chat_threads SET unread = FALSE WHERE report_id = $1")
        .bind(report_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Refresh the thread preview after a new message.
pub async fn touch_thread(
    pool: &PgPool,
    report_id: i64,
    preview: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE chat_threads
        SET last_message = $2, unread = TRUE, updated_at = now()
        WHERE report_id = $1
        "#,
    )
    .bind(report_id)
    .bind(preview)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_message(
    pool: &PgPool,
    report_id: i64,
    sender_id: &str,
    body: &str,
) -> Result<ChatMessage, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (report_id, sender_id, body)
        VALUES ($1, $2, $3)
        RETURNING id, report_id, sender_id, body, sent_at
        "#,
    )
    .bind(report_id)
    .bind(sender_id)
    .bind(body)
    .fetch_one(pool)
    .await
}

pub async fn list_messages(
    pool: &PgPool,
    report_id: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, report_id, sender_id, body, sent_at
        FROM chat_messages
        WHERE report_id = $1
        ORDER BY sent_at ASC, id ASC
        "#,
    )
    .bind(report_id)
    .fetch_all(pool)
    .await
}

/// Wipe every stored collection in one transaction.
pub async fn clear_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM chat_messages").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM chat_threads").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM notifications").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM reports").execute(&mut *tx).await?;
    tx.commit().await
}
