//! Screening orchestration: obtain a fit score for an application from the
//! external scoring service, or degrade to the deterministic baseline scorer
//! when that service misbehaves. Degrading is not an error path here; it is
//! the second branch of an ordinary two-way result.

mod config;
pub mod fallback;
mod scoring;

pub use config::ScreeningConfig;
pub use scoring::{
    CandidateProfile, JobProfile, ScoringError, ScoringRequest, ScoringResponse, ScoringService,
};

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::time::timeout;

use super::domain::{
    ApplicationDossier, ApplicationId, NewScreeningResult, ScreeningResult, ScreeningStage, UserId,
};
use super::notify::{self, AuditEntry, AuditSink, Notification, Notifier};
use super::repository::WorkflowStore;
use super::service::{ApplicationWorkflow, WorkflowError};

const FALLBACK_NOTE: &str = "scoring service unavailable, falling back to baseline screening";

/// One scored outcome, whichever branch produced it.
#[derive(Debug, Clone, PartialEq)]
struct Scored {
    stage: ScreeningStage,
    fit_score: f64,
    details: Value,
}

/// Runs screening attempts for applications and persists their results.
///
/// Reads go through the workflow's dossier path; scoring, notification, and
/// audit are separate collaborators so tests can swap any of them out.
pub struct ScreeningOrchestrator<S, M, N, A> {
    workflow: Arc<ApplicationWorkflow<S, N>>,
    store: Arc<S>,
    scoring: Arc<M>,
    notifier: Arc<N>,
    audit: Arc<A>,
    config: ScreeningConfig,
}

impl<S, M, N, A> ScreeningOrchestrator<S, M, N, A>
where
    S: WorkflowStore + 'static,
    M: ScoringService + 'static,
    N: Notifier + 'static,
    A: AuditSink + 'static,
{
    pub fn new(
        workflow: Arc<ApplicationWorkflow<S, N>>,
        store: Arc<S>,
        scoring: Arc<M>,
        notifier: Arc<N>,
        audit: Arc<A>,
        config: ScreeningConfig,
    ) -> Self {
        Self {
            workflow,
            store,
            scoring,
            notifier,
            audit,
            config,
        }
    }

    /// Score one application and append the result to its screening history.
    ///
    /// The only caller-visible failures are a missing application and store
    /// unavailability. A misbehaving scoring service never fails the call:
    /// timeouts, transport errors, and malformed payloads all land on the
    /// baseline branch, and the persisted result's stage records which branch
    /// ran. Repeated invocations append; they never overwrite.
    pub async fn run_screening(
        &self,
        application_id: &ApplicationId,
        acting_user: Option<&UserId>,
    ) -> Result<ScreeningResult, WorkflowError> {
        let dossier = self.workflow.dossier(application_id).await?;

        let request = ScoringRequest::from(&dossier);
        let scored = match self.score_remote(&request).await {
            Ok(scored) => scored,
            Err(err) => {
                tracing::warn!(
                    application = %application_id.0,
                    error = %err,
                    "scoring service failed, using baseline screening"
                );
                baseline_branch(&dossier)
            }
        };

        let result = self
            .store
            .append_result(NewScreeningResult {
                application_id: application_id.clone(),
                stage: scored.stage,
                fit_score: scored.fit_score,
                details: scored.details,
            })
            .await?;

        tracing::info!(
            application = %application_id.0,
            stage = result.stage.label(),
            fit_score = result.fit_score,
            "screening result recorded"
        );

        // Audit is awaited so coverage is not lost on process exit, but its
        // failure must never fail an otherwise successful screening run.
        if let Some(user) = acting_user {
            let entry = AuditEntry::screening_run(
                user.clone(),
                application_id,
                result.stage,
                result.fit_score,
            );
            if let Err(err) = self.audit.record(entry).await {
                tracing::error!(
                    application = %application_id.0,
                    error = %err,
                    "failed to record screening audit entry"
                );
            }
        }

        notify::dispatch(
            &self.notifier,
            Notification::ScreeningCompleted {
                recipient: dossier.job.created_by.clone(),
                candidate_name: dossier.candidate.name.clone(),
                job_title: dossier.job.title.clone(),
                stage: result.stage,
                fit_score: result.fit_score,
            },
        );

        Ok(result)
    }

    /// Full screening history for an application, newest first. An empty
    /// history is an ordinary answer, not an error.
    pub async fn get_results(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ScreeningResult>, WorkflowError> {
        Ok(self.store.results_for(application_id).await?)
    }

    async fn score_remote(&self, request: &ScoringRequest) -> Result<Scored, ScoringError> {
        let response = timeout(self.config.scoring_timeout, self.scoring.score(request))
            .await
            .map_err(|_| ScoringError::Timeout(self.config.scoring_timeout))??;

        if !response.fit_score.is_finite() || !(0.0..=1.0).contains(&response.fit_score) {
            return Err(ScoringError::MalformedResponse(format!(
                "fit score {} outside [0, 1]",
                response.fit_score
            )));
        }

        Ok(Scored {
            stage: ScreeningStage::AiScreening,
            fit_score: response.fit_score,
            details: response.details,
        })
    }
}

fn baseline_branch(dossier: &ApplicationDossier) -> Scored {
    let baseline = fallback::score(&dossier.job, &dossier.candidate);

    Scored {
        stage: ScreeningStage::BasicScreening,
        fit_score: baseline.fit_score,
        details: json!({
            "jobSkills": &dossier.job.skills,
            "candidateSkills": &dossier.candidate.skills,
            "experienceMatch": baseline.experience_match,
            "skillMatch": baseline.skill_match,
            "note": FALLBACK_NOTE,
        }),
    }
}
