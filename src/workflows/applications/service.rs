use std::sync::Arc;

use super::domain::{
    Application, ApplicationDossier, ApplicationId, ApplicationStatus, CandidateId, JobId,
    NewApplication, UserId,
};
use super::notify::{self, Notification, Notifier};
use super::repository::{RepositoryError, WorkflowStore};

/// Owns the lifecycle of job applications: creation with duplicate
/// prevention, status transitions, and the authorization rules for both.
///
/// The store and notifier are explicit collaborators passed in at
/// construction, and the acting user is an explicit parameter on every
/// mutation, so each call site shows exactly whose authority it runs under.
pub struct ApplicationWorkflow<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> ApplicationWorkflow<S, N>
where
    S: WorkflowStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Submit a new application for a candidate.
    ///
    /// The job and candidate must both exist, and no application may already
    /// exist for the pair. The pre-check catches the common duplicate early;
    /// the store's uniqueness constraint closes the race between two
    /// concurrent submissions, and an insert-time conflict surfaces as the
    /// same `AlreadyApplied` failure.
    pub async fn create(
        &self,
        job_id: JobId,
        candidate_id: CandidateId,
        submitted_by: UserId,
        cover_letter: Option<String>,
    ) -> Result<Application, WorkflowError> {
        let job = self
            .store
            .find_job(&job_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "job" })?;
        let candidate = self
            .store
            .find_candidate(&candidate_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "candidate" })?;

        if self
            .store
            .application_for(&job_id, &candidate_id)
            .await?
            .is_some()
        {
            return Err(WorkflowError::AlreadyApplied);
        }

        let application = self
            .store
            .insert_application(NewApplication {
                job_id,
                candidate_id,
                submitted_by,
                cover_letter,
            })
            .await?;

        tracing::info!(
            application = %application.id.0,
            job = %application.job_id.0,
            "application submitted"
        );

        notify::dispatch(
            &self.notifier,
            Notification::ApplicationSubmitted {
                recipient: candidate.user_id,
                candidate_name: candidate.name,
                job_title: job.title,
            },
        );

        Ok(application)
    }

    /// Move an application to a new status.
    ///
    /// Only the recruiter who created the job may do this; there is no
    /// administrator bypass here. Terminal statuses reject every transition
    /// regardless of the requested target.
    pub async fn update_status(
        &self,
        application_id: &ApplicationId,
        new_status: ApplicationStatus,
        acting_user: &UserId,
    ) -> Result<Application, WorkflowError> {
        let application = self
            .store
            .find_application(application_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "application" })?;
        let job = self
            .store
            .find_job(&application.job_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "job" })?;

        if job.created_by != *acting_user {
            return Err(WorkflowError::Forbidden {
                action: "update status for",
            });
        }

        if !application.status.permits_transition_to(new_status) {
            return Err(WorkflowError::InvalidTransition {
                current: application.status,
            });
        }

        let updated = self.store.update_status(application_id, new_status).await?;

        tracing::info!(
            application = %updated.id.0,
            from = application.status.label(),
            to = updated.status.label(),
            "application status changed"
        );

        if let Some(candidate) = self.store.find_candidate(&updated.candidate_id).await? {
            notify::dispatch(
                &self.notifier,
                Notification::StatusChanged {
                    recipient: candidate.user_id,
                    candidate_name: candidate.name,
                    job_title: job.title,
                    status: updated.status,
                },
            );
        }

        Ok(updated)
    }

    /// Read one application. Visible only to the user who submitted it and
    /// to the recruiter who owns the job.
    pub async fn get(
        &self,
        application_id: &ApplicationId,
        acting_user: &UserId,
    ) -> Result<Application, WorkflowError> {
        let application = self
            .store
            .find_application(application_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "application" })?;

        if application.submitted_by == *acting_user {
            return Ok(application);
        }

        let job = self
            .store
            .find_job(&application.job_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "job" })?;
        if job.created_by != *acting_user {
            return Err(WorkflowError::Forbidden { action: "view" });
        }

        Ok(application)
    }

    /// List a job's applications, newest first. Recruiter-only.
    pub async fn list_for_job(
        &self,
        job_id: &JobId,
        acting_user: &UserId,
    ) -> Result<Vec<Application>, WorkflowError> {
        let job = self
            .store
            .find_job(job_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "job" })?;
        if job.created_by != *acting_user {
            return Err(WorkflowError::Forbidden {
                action: "list applications for",
            });
        }

        Ok(self.store.applications_for_job(job_id).await?)
    }

    /// List every application a candidate has submitted, newest first.
    pub async fn list_for_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, WorkflowError> {
        Ok(self.store.applications_for_candidate(candidate_id).await?)
    }

    /// Unauthenticated joined read used by the screening orchestrator; the
    /// application, its job, and its candidate fetched together.
    pub async fn dossier(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationDossier, WorkflowError> {
        let application = self
            .store
            .find_application(application_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "application" })?;
        let job = self
            .store
            .find_job(&application.job_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "job" })?;
        let candidate = self
            .store
            .find_candidate(&application.candidate_id)
            .await?
            .ok_or(WorkflowError::NotFound { entity: "candidate" })?;

        Ok(ApplicationDossier {
            application,
            job,
            candidate,
        })
    }
}

/// Caller-visible failures of workflow operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("candidate has already applied for this job")]
    AlreadyApplied,
    #[error("acting user is not permitted to {action} this application")]
    Forbidden { action: &'static str },
    #[error("application in terminal status {} cannot change status", .current.label())]
    InvalidTransition { current: ApplicationStatus },
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for WorkflowError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict => WorkflowError::AlreadyApplied,
            RepositoryError::NotFound => WorkflowError::NotFound {
                entity: "application",
            },
            other => WorkflowError::Repository(other),
        }
    }
}
