use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{ApplicationId, ApplicationStatus, ScreeningStage, UserId};

/// Candidate- and recruiter-facing messages the workflow emits.
///
/// Delivery is best effort: the workflow dispatches and moves on, and a
/// failed delivery never fails the operation that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    ApplicationSubmitted {
        recipient: UserId,
        candidate_name: String,
        job_title: String,
    },
    StatusChanged {
        recipient: UserId,
        candidate_name: String,
        job_title: String,
        status: ApplicationStatus,
    },
    ScreeningCompleted {
        recipient: UserId,
        candidate_name: String,
        job_title: String,
        stage: ScreeningStage,
        fit_score: f64,
    },
}

/// Outbound delivery hook (e-mail adapter, webhook, in-app inbox).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Fire-and-forget dispatch: hand the notification to the runtime and return
/// immediately. Failures are logged, never retried and never propagated.
pub(crate) fn dispatch<N>(notifier: &Arc<N>, notification: Notification)
where
    N: Notifier + 'static,
{
    let notifier = Arc::clone(notifier);
    tokio::spawn(async move {
        if let Err(err) = notifier.deliver(notification).await {
            tracing::warn!(error = %err, "notification delivery failed");
        }
    });
}

/// One append-only audit row. Only the screening-run action writes these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub acting_user: UserId,
    pub action: &'static str,
    pub resource_type: &'static str,
    pub resource_id: String,
    pub metadata: Value,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    pub(crate) fn screening_run(
        acting_user: UserId,
        application_id: &ApplicationId,
        stage: ScreeningStage,
        fit_score: f64,
    ) -> Self {
        Self {
            acting_user,
            action: "RUN_SCREENING",
            resource_type: "application",
            resource_id: application_id.0.clone(),
            metadata: serde_json::json!({
                "stage": stage.label(),
                "fitScore": fit_score,
            }),
            recorded_at: Utc::now(),
        }
    }
}

/// Append-only audit recording.
///
/// Unlike notifications this is awaited before the triggering call returns,
/// so audit coverage is not silently lost on process exit; its own failure is
/// still swallowed and logged rather than surfaced.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Audit recording error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
