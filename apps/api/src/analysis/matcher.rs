//! Job matching — scores a candidate's skill set against each job's required skills.
//!
//! `match_percent = 100 × |candidate ∩ required| / |required|`, rounded to two
//! decimals and defined as 0 when a job lists no skills.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::analysis::skills::SkillSet;
use crate::models::job::JobRequirement;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Score of one job against one candidate. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub title: String,
    pub company: String,
    pub match_percent: f64, // 0.0 – 100.0
    /// Raw requirement string, as stored.
    pub required_skills: String,
    /// In the job's requirement order.
    pub matching_skills: Vec<String>,
}

impl MatchResult {
    /// Display form of `matching_skills`.
    pub fn matching_skills_csv(&self) -> String {
        self.matching_skills.join(", ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Splits a stored requirement string on commas into trimmed, lower-cased
/// skills. Blank entries are dropped and repeats collapse to the first one.
pub fn parse_required_skills(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Scores a single job.
pub fn score_job(candidate: &SkillSet, job: &JobRequirement) -> MatchResult {
    let required = parse_required_skills(&job.required_skills);

    let matching_skills: Vec<String> = required
        .iter()
        .filter(|s| candidate.contains(s.as_str()))
        .cloned()
        .collect();

    let match_percent = if required.is_empty() {
        0.0
    } else {
        round_to_hundredths(100.0 * matching_skills.len() as f64 / required.len() as f64)
    };

    MatchResult {
        title: job.title.clone(),
        company: job.company.clone(),
        match_percent,
        required_skills: job.required_skills.clone(),
        matching_skills,
    }
}

/// One result per job, in input order.
pub fn match_jobs(candidate: &SkillSet, jobs: &[JobRequirement]) -> Vec<MatchResult> {
    jobs.iter().map(|job| score_job(candidate, job)).collect()
}

/// Orders results best-first; ties fall back to title, then company.
pub fn sort_by_match_desc(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.match_percent
            .partial_cmp(&a.match_percent)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.company.cmp(&b.company))
    });
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
