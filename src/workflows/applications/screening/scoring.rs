use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::domain::ApplicationDossier;

/// Job-side half of a scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub minimum_experience: u8,
}

/// Candidate-side half of a scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub years_experience: u8,
    pub resume_url: Option<String>,
}

/// Everything the external scoring service needs to judge a fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub job: JobProfile,
    pub candidate: CandidateProfile,
    pub cover_letter: Option<String>,
}

impl From<&ApplicationDossier> for ScoringRequest {
    fn from(dossier: &ApplicationDossier) -> Self {
        Self {
            job: JobProfile {
                title: dossier.job.title.clone(),
                description: dossier.job.description.clone(),
                skills: dossier.job.skills.clone(),
                minimum_experience: dossier.job.minimum_experience,
            },
            candidate: CandidateProfile {
                skills: dossier.candidate.skills.clone(),
                years_experience: dossier.candidate.years_experience,
                resume_url: dossier.candidate.resume_url.clone(),
            },
            cover_letter: dossier.application.cover_letter.clone(),
        }
    }
}

/// Service response: a normalized fit score plus whatever structured
/// sub-scores the model produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub fit_score: f64,
    pub details: Value,
}

/// Remote scoring collaborator. May be slow, unreachable, or wrong; every
/// failure mode here stays inside the screening module and degrades to the
/// baseline algorithm.
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn score(&self, request: &ScoringRequest) -> Result<ScoringResponse, ScoringError>;
}

/// Internal-only failure signal between the scoring call and the fallback
/// branch. Never surfaced to callers of the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("scoring transport failed: {0}")]
    Transport(String),
    #[error("scoring service returned a malformed response: {0}")]
    MalformedResponse(String),
}
