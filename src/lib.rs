//! Core hiring workflow for an applicant tracking pipeline.
//!
//! The crate owns two tightly coupled pieces: the application lifecycle state
//! machine (who may move a candidate's application between statuses, and when)
//! and the screening orchestration that obtains a candidate/job fit score from
//! an external scoring service, degrading to a deterministic baseline score
//! whenever that service is slow, unreachable, or returns garbage.
//!
//! Persistence, notification delivery, scoring, and audit recording are all
//! capability traits supplied by the caller, so the workflow logic can be
//! exercised in isolation with in-memory collaborators.

pub mod config;
pub mod telemetry;
pub mod workflows;
