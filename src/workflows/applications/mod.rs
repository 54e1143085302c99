//! Job application lifecycle and screening.
//!
//! `service::ApplicationWorkflow` owns creation and status transitions;
//! `screening::ScreeningOrchestrator` owns fit scoring with its degrade-to-
//! baseline resilience. Both talk to the outside world only through the
//! capability traits in `repository` and `notify`.

pub mod domain;
pub mod notify;
pub mod repository;
pub mod screening;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDossier, ApplicationId, ApplicationStatus, Candidate, CandidateId,
    Job, JobId, NewApplication, NewScreeningResult, ScreeningResult, ScreeningResultId,
    ScreeningStage, UserId,
};
pub use notify::{AuditEntry, AuditError, AuditSink, Notification, Notifier, NotifyError};
pub use repository::{RepositoryError, WorkflowStore};
pub use screening::{
    ScoringError, ScoringRequest, ScoringResponse, ScoringService, ScreeningConfig,
    ScreeningOrchestrator,
};
pub use service::{ApplicationWorkflow, WorkflowError};
