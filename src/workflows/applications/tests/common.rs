use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::workflows::applications::domain::{
    Application, ApplicationId, ApplicationStatus, Candidate, CandidateId, Job, JobId,
    NewApplication, NewScreeningResult, ScreeningResult, ScreeningResultId, UserId,
};
use crate::workflows::applications::notify::{
    AuditEntry, AuditError, AuditSink, Notification, Notifier, NotifyError,
};
use crate::workflows::applications::repository::{RepositoryError, WorkflowStore};
use crate::workflows::applications::screening::{
    ScoringError, ScoringRequest, ScoringResponse, ScoringService, ScreeningConfig,
    ScreeningOrchestrator,
};
use crate::workflows::applications::service::ApplicationWorkflow;

pub(super) fn sample_job() -> Job {
    Job {
        id: JobId("job-backend".to_string()),
        created_by: UserId("user-recruiter".to_string()),
        title: "Backend Engineer".to_string(),
        description: "Own the services behind the hiring pipeline".to_string(),
        skills: vec!["JavaScript".to_string(), "TypeScript".to_string()],
        minimum_experience: 3,
    }
}

pub(super) fn sample_candidate() -> Candidate {
    Candidate {
        id: CandidateId("cand-jordan".to_string()),
        user_id: UserId("user-jordan".to_string()),
        name: "Jordan Reyes".to_string(),
        skills: vec![
            "JavaScript".to_string(),
            "TypeScript".to_string(),
            "React".to_string(),
        ],
        years_experience: 5,
        resume_url: Some("s3://hireflow/resumes/jordan.pdf".to_string()),
    }
}

pub(super) fn recruiter() -> UserId {
    UserId("user-recruiter".to_string())
}

pub(super) fn candidate_user() -> UserId {
    UserId("user-jordan".to_string())
}

pub(super) fn stranger() -> UserId {
    UserId("user-stranger".to_string())
}

/// Let fire-and-forget tasks spawned by the call under test run to completion.
pub(super) async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    jobs: Mutex<HashMap<String, Job>>,
    candidates: Mutex<HashMap<String, Candidate>>,
    applications: Mutex<Vec<Application>>,
    results: Mutex<Vec<ScreeningResult>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub(super) fn seeded() -> Self {
        let store = Self::default();
        store.put_job(sample_job());
        store.put_candidate(sample_candidate());
        store
    }

    pub(super) fn put_job(&self, job: Job) {
        self.jobs
            .lock()
            .expect("jobs mutex poisoned")
            .insert(job.id.0.clone(), job);
    }

    pub(super) fn put_candidate(&self, candidate: Candidate) {
        self.candidates
            .lock()
            .expect("candidates mutex poisoned")
            .insert(candidate.id.0.clone(), candidate);
    }

    pub(super) fn application_count(&self) -> usize {
        self.applications
            .lock()
            .expect("applications mutex poisoned")
            .len()
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self
            .jobs
            .lock()
            .expect("jobs mutex poisoned")
            .get(&id.0)
            .cloned())
    }

    async fn find_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Ok(self
            .candidates
            .lock()
            .expect("candidates mutex poisoned")
            .get(&id.0)
            .cloned())
    }

    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .applications
            .lock()
            .expect("applications mutex poisoned")
            .iter()
            .find(|application| application.id == *id)
            .cloned())
    }

    async fn application_for(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .applications
            .lock()
            .expect("applications mutex poisoned")
            .iter()
            .find(|application| {
                application.job_id == *job_id && application.candidate_id == *candidate_id
            })
            .cloned())
    }

    async fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, RepositoryError> {
        let mut guard = self.applications.lock().expect("applications mutex poisoned");
        // Uniqueness on (job, candidate) is enforced here, inside the lock,
        // mirroring a database unique constraint.
        if guard.iter().any(|existing| {
            existing.job_id == application.job_id
                && existing.candidate_id == application.candidate_id
        }) {
            return Err(RepositoryError::Conflict);
        }

        let now = Utc::now();
        let stored = Application {
            id: ApplicationId(format!("app-{:03}", self.next_sequence())),
            job_id: application.job_id,
            candidate_id: application.candidate_id,
            submitted_by: application.submitted_by,
            status: ApplicationStatus::Submitted,
            cover_letter: application.cover_letter,
            created_at: now,
            updated_at: now,
        };
        guard.push(stored.clone());
        Ok(stored)
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        let mut guard = self.applications.lock().expect("applications mutex poisoned");
        let application = guard
            .iter_mut()
            .find(|application| application.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        application.status = status;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }

    async fn append_result(
        &self,
        result: NewScreeningResult,
    ) -> Result<ScreeningResult, RepositoryError> {
        let stored = ScreeningResult {
            id: ScreeningResultId(format!("sr-{:03}", self.next_sequence())),
            application_id: result.application_id,
            stage: result.stage,
            fit_score: result.fit_score,
            details: result.details,
            created_at: Utc::now(),
        };
        self.results
            .lock()
            .expect("results mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    async fn results_for(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ScreeningResult>, RepositoryError> {
        let mut matching: Vec<ScreeningResult> = self
            .results
            .lock()
            .expect("results mutex poisoned")
            .iter()
            .filter(|result| result.application_id == *application_id)
            .cloned()
            .collect();
        matching.reverse();
        Ok(matching)
    }

    async fn applications_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let mut matching: Vec<Application> = self
            .applications
            .lock()
            .expect("applications mutex poisoned")
            .iter()
            .filter(|application| application.job_id == *job_id)
            .cloned()
            .collect();
        matching.reverse();
        Ok(matching)
    }

    async fn applications_for_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let mut matching: Vec<Application> = self
            .applications
            .lock()
            .expect("applications mutex poisoned")
            .iter()
            .filter(|application| application.candidate_id == *candidate_id)
            .cloned()
            .collect();
        matching.reverse();
        Ok(matching)
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl WorkflowStore for UnavailableStore {
    async fn find_job(&self, _id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn find_candidate(
        &self,
        _id: &CandidateId,
    ) -> Result<Option<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn find_application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn application_for(
        &self,
        _job_id: &JobId,
        _candidate_id: &CandidateId,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn insert_application(
        &self,
        _application: NewApplication,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn append_result(
        &self,
        _result: NewScreeningResult,
    ) -> Result<ScreeningResult, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn results_for(
        &self,
        _application_id: &ApplicationId,
    ) -> Result<Vec<ScreeningResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn applications_for_job(
        &self,
        _job_id: &JobId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn applications_for_candidate(
        &self,
        _candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, notification: Notification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn deliver(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp refused".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingAudit {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAudit {
    pub(super) fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAudit {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }
}

pub(super) struct FailingAudit;

#[async_trait]
impl AuditSink for FailingAudit {
    async fn record(&self, _entry: AuditEntry) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("audit log offline".to_string()))
    }
}

/// Scoring fake that answers immediately with a canned response.
pub(super) struct ScriptedScoring {
    response: ScoringResponse,
}

impl ScriptedScoring {
    pub(super) fn with_score(fit_score: f64) -> Self {
        Self {
            response: ScoringResponse {
                fit_score,
                details: json!({
                    "skillSimilarity": 0.91,
                    "experienceMatch": true,
                }),
            },
        }
    }
}

#[async_trait]
impl ScoringService for ScriptedScoring {
    async fn score(&self, _request: &ScoringRequest) -> Result<ScoringResponse, ScoringError> {
        Ok(self.response.clone())
    }
}

/// Scoring fake whose transport always fails.
pub(super) struct ErringScoring;

#[async_trait]
impl ScoringService for ErringScoring {
    async fn score(&self, _request: &ScoringRequest) -> Result<ScoringResponse, ScoringError> {
        Err(ScoringError::Transport("connection refused".to_string()))
    }
}

/// Scoring fake that never answers in time.
pub(super) struct StalledScoring;

#[async_trait]
impl ScoringService for StalledScoring {
    async fn score(&self, _request: &ScoringRequest) -> Result<ScoringResponse, ScoringError> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Err(ScoringError::Transport("unreachable".to_string()))
    }
}

pub(super) struct Harness {
    pub(super) store: Arc<MemoryStore>,
    pub(super) notifier: Arc<RecordingNotifier>,
    pub(super) audit: Arc<RecordingAudit>,
    pub(super) workflow: Arc<ApplicationWorkflow<MemoryStore, RecordingNotifier>>,
}

pub(super) fn harness() -> Harness {
    let store = Arc::new(MemoryStore::seeded());
    let notifier = Arc::new(RecordingNotifier::default());
    let audit = Arc::new(RecordingAudit::default());
    let workflow = Arc::new(ApplicationWorkflow::new(store.clone(), notifier.clone()));
    Harness {
        store,
        notifier,
        audit,
        workflow,
    }
}

pub(super) fn orchestrator_with<M>(
    harness: &Harness,
    scoring: Arc<M>,
) -> ScreeningOrchestrator<MemoryStore, M, RecordingNotifier, RecordingAudit>
where
    M: ScoringService + 'static,
{
    ScreeningOrchestrator::new(
        harness.workflow.clone(),
        harness.store.clone(),
        scoring,
        harness.notifier.clone(),
        harness.audit.clone(),
        ScreeningConfig::default(),
    )
}

pub(super) async fn submitted_application(harness: &Harness) -> ApplicationId {
    harness
        .workflow
        .create(
            sample_job().id,
            sample_candidate().id,
            candidate_user(),
            Some("I have shipped three production services.".to_string()),
        )
        .await
        .expect("application submits")
        .id
}
