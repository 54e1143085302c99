use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for a job application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for an advertised job opening.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for an account acting on or referenced by the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for one persisted screening attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreeningResultId(pub String);

/// Lifecycle status of an application.
///
/// `Offer` and `Rejected` are terminal: once an application reaches either,
/// no further transition is permitted. Between the non-terminal statuses any
/// move is allowed in either direction, so a recruiter can pull an
/// application back from `Interview` to `Screening` without ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    Screening,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "SUBMITTED",
            ApplicationStatus::Screening => "SCREENING",
            ApplicationStatus::Interview => "INTERVIEW",
            ApplicationStatus::Offer => "OFFER",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Offer | ApplicationStatus::Rejected
        )
    }

    /// Whether the state machine allows leaving `self` for `target`.
    pub const fn permits_transition_to(self, _target: ApplicationStatus) -> bool {
        !self.is_terminal()
    }
}

/// One candidate's submission to one job opening.
///
/// At most one application may exist per (job, candidate) pair; the store
/// enforces that as a uniqueness constraint at insert time. Timestamps are
/// assigned by the store on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub submitted_by: UserId,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new application; the store assigns id, initial
/// `Submitted` status, and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApplication {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub submitted_by: UserId,
    pub cover_letter: Option<String>,
}

/// Job opening, read-only to this core. Consulted for ownership checks
/// (`created_by` is the recruiter who may move applications) and as scoring
/// input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub created_by: UserId,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub minimum_experience: u8,
}

/// Candidate record, read-only to this core. `user_id` routes notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub user_id: UserId,
    pub name: String,
    pub skills: Vec<String>,
    pub years_experience: u8,
    pub resume_url: Option<String>,
}

/// Provenance tag on a screening result: did the score come from the external
/// scoring service or from the local baseline algorithm?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreeningStage {
    AiScreening,
    BasicScreening,
}

impl ScreeningStage {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningStage::AiScreening => "AI_SCREENING",
            ScreeningStage::BasicScreening => "BASIC_SCREENING",
        }
    }
}

/// Immutable record of one scoring attempt. Results are only ever appended,
/// so an application accumulates a history; the newest entry by `created_at`
/// is the current score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub id: ScreeningResultId,
    pub application_id: ApplicationId,
    pub stage: ScreeningStage,
    pub fit_score: f64,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

/// Append payload for a screening attempt; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScreeningResult {
    pub application_id: ApplicationId,
    pub stage: ScreeningStage,
    pub fit_score: f64,
    pub details: Value,
}

/// The joined read the screening path operates on: an application together
/// with its job and candidate, fetched in one pass so no step acts on stale
/// halves of the picture.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDossier {
    pub application: Application,
    pub job: Job,
    pub candidate: Candidate,
}
