use async_trait::async_trait;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Candidate, CandidateId, Job, JobId,
    NewApplication, NewScreeningResult, ScreeningResult,
};

/// Storage abstraction over the records the workflow operates on.
///
/// The core never caches entities across calls; every operation re-reads
/// through this trait so it cannot act on stale state. Implementations own
/// id assignment and `created_at`/`updated_at` stamping.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    async fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;

    async fn find_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;

    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError>;

    /// Lookup by the unique (job, candidate) pair.
    async fn application_for(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Result<Option<Application>, RepositoryError>;

    /// Insert a new application in `Submitted` status.
    ///
    /// The duplicate check and the insert must be one atomic unit: when an
    /// application already exists for the (job, candidate) pair — including
    /// one racing in from a concurrent caller — the store must return
    /// [`RepositoryError::Conflict`] rather than persist a second row.
    async fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, RepositoryError>;

    /// Persist a status change and refresh `updated_at`.
    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, RepositoryError>;

    /// Append one screening attempt; results are never updated in place.
    async fn append_result(
        &self,
        result: NewScreeningResult,
    ) -> Result<ScreeningResult, RepositoryError>;

    /// All screening attempts for an application, most recent first.
    async fn results_for(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ScreeningResult>, RepositoryError>;

    /// All applications submitted to a job, most recent first.
    async fn applications_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<Application>, RepositoryError>;

    /// All applications submitted by a candidate, most recent first.
    async fn applications_for_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
