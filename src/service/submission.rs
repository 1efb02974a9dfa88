use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashSet;

use crate::db::queries;
use crate::error::{AppError, Result};
use crate::models::{
    NewReport, Notification, NotificationKind, Report, ReportDraft, ReportStatus, SessionUser,
};
use crate::service::scoring::{self, MatchParams};

/// A candidate that met the threshold, paired with its score. Transient:
/// never persisted beyond the notification record.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMatch {
    pub score: u32,
    pub report: Report,
}

/// What the submission flow hands back to the UI layer. Duplicate and auth
/// failures surface as errors, not outcomes.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Matched {
        report: Report,
        matches: Vec<ScoredMatch>,
    },
    NoMatch {
        report: Report,
    },
}

/// Submission orchestrator: duplicate guard, persistence, candidate search,
/// scoring, notification.
pub struct SubmissionService {
    pool: PgPool,
    params: MatchParams,
}

impl SubmissionService {
    pub fn new(pool: PgPool, params: MatchParams) -> Self {
        Self { pool, params }
    }

    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    /// Full submission lifecycle. The insert is the point of no return: up to
    /// it, any failure aborts with nothing persisted; after it, failures in
    /// the match search degrade to the no-match branch.
    pub async fn submit(
        &self,
        user: Option<&SessionUser>,
        draft: ReportDraft,
    ) -> Result<SubmissionOutcome> {
        let user = SessionUser::require(user)?;
        let new = draft.validate()?;

        let mine = queries::list_reports_for_user(&self.pool, &user.id).await?;
        if scoring::is_duplicate(&new, &mine, self.params.duplicate_policy) {
            tracing::info!(
                "rejected duplicate {} {} report at '{}' from {}",
                new.kind,
                new.category,
                new.location,
                user.id
            );
            return Err(AppError::DuplicateReport);
        }

        let mut report = queries::insert_report(&self.pool, &new, &user.id).await?;
        tracing::info!(
            "report {} stored: {} {} at '{}'",
            report.id,
            report.kind,
            report.category,
            report.location
        );

        let candidates = match queries::list_candidates(
            &self.pool,
            new.kind.opposite(),
            new.category,
            &user.id,
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    "candidate query failed for report {}, treating as no match: {}",
                    report.id,
                    e
                );
                Vec::new()
            }
        };

        let matches = evaluate_candidates(&new, candidates, &self.params);
        if matches.is_empty() {
            tracing::info!("report {}: no strong match", report.id);
            return Ok(SubmissionOutcome::NoMatch { report });
        }
        tracing::info!(
            "report {}: {} strong match(es), top score {}",
            report.id,
            matches.len(),
            matches[0].score
        );

        if let Err(e) = queries::set_status(&self.pool, report.id, ReportStatus::Matched).await {
            tracing::warn!("failed to mark report {} matched: {}", report.id, e);
        }
        report.status = ReportStatus::Matched;

        let message = match_message(&new);
        let mut notified: HashSet<&str> = HashSet::new();
        for m in &matches {
            if notified.insert(m.report.owner_id.as_str()) {
                if let Err(e) = queries::insert_notification(
                    &self.pool,
                    &m.report.owner_id,
                    NotificationKind::MatchFound,
                    &message,
                )
                .await
                {
                    tracing::warn!(
                        "notification insert failed for {}: {}",
                        m.report.owner_id,
                        e
                    );
                }
            }
        }

        Ok(SubmissionOutcome::Matched { report, matches })
    }

    pub async fn history(&self) -> Result<Vec<Report>> {
        Ok(queries::list_reports(&self.pool).await?)
    }

    pub async fn delete(&self, user: Option<&SessionUser>, id: i64) -> Result<()> {
        let user = SessionUser::require(user)?;
        let removed = queries::delete_report(&self.pool, id, &user.id).await?;
        if removed == 0 {
            return Err(AppError::ReportNotFound(id));
        }
        tracing::info!("report {} deleted by {}", id, user.id);
        Ok(())
    }

    pub async fn notifications(&self, user: Option<&SessionUser>) -> Result<Vec<Notification>> {
        let user = SessionUser::require(user)?;
        Ok(queries::list_notifications(&self.pool, &user.id).await?)
    }
}

/// Score every candidate, keep the strong ones, best first.
fn evaluate_candidates(
    new: &NewReport,
    candidates: Vec<Report>,
    params: &MatchParams,
) -> Vec<ScoredMatch> {
    let mut matches: Vec<ScoredMatch> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = scoring::score(new, &candidate, params);
            (score >= params.threshold).then_some(ScoredMatch {
                score,
                report: candidate,
            })
        })
        .collect();
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Notification copy shown to owners of the matched candidates.
fn match_message(new: &NewReport) -> String {
    format!(
        "A new {} item matches your {} {} report",
        new.kind,
        new.kind.opposite(),
        new.category
    )
}
