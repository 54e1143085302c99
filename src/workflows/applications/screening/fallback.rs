//! Deterministic baseline scoring.
//!
//! This is both the resilience fallback when the external scoring service is
//! unavailable and the reference local scorer. It is pure: no clocks, no IO,
//! no collaborators, so it can be unit tested exhaustively.

use super::super::domain::{Candidate, Job};

// Canonical formula weights. Every caller goes through these constants.
const BASE_SCORE: f64 = 0.5;
const EXPERIENCE_BONUS: f64 = 0.3;
const SKILL_WEIGHT: f64 = 0.5;

/// Output of the baseline scorer, keeping the sub-signals alongside the
/// composite so the persisted details can explain the number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineScore {
    pub fit_score: f64,
    pub experience_match: bool,
    pub skill_match: f64,
}

/// Score a candidate against a job.
///
/// Base 0.5, plus 0.3 when the candidate meets the job's minimum years of
/// experience, plus half of the skill-match ratio, clamped to [0, 1].
pub fn score(job: &Job, candidate: &Candidate) -> BaselineScore {
    let experience_match = candidate.years_experience >= job.minimum_experience;
    let skill_match = skill_match_ratio(&job.skills, &candidate.skills);

    let mut fit_score = BASE_SCORE;
    if experience_match {
        fit_score += EXPERIENCE_BONUS;
    }
    fit_score += skill_match * SKILL_WEIGHT;

    BaselineScore {
        fit_score: fit_score.clamp(0.0, 1.0),
        experience_match,
        skill_match,
    }
}

/// Fraction of required skills matched by the candidate, in [0, 1].
///
/// A required skill counts as matched when it and any candidate skill contain
/// each other as case-insensitive substrings in either direction, so
/// "TypeScript" matches "typescript" and "Node" matches "Node.js". A job with
/// no required skills is a perfect match by convention.
pub fn skill_match_ratio(required: &[String], offered: &[String]) -> f64 {
    if required.is_empty() {
        return 1.0;
    }

    let offered: Vec<String> = offered.iter().map(|skill| skill.to_lowercase()).collect();
    let matched = required
        .iter()
        .map(|skill| skill.to_lowercase())
        .filter(|required_skill| {
            offered.iter().any(|offered_skill| {
                offered_skill.contains(required_skill.as_str())
                    || required_skill.contains(offered_skill.as_str())
            })
        })
        .count();

    matched as f64 / required.len() as f64
}
