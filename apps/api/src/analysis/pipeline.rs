//! Resume analysis pipeline: extract text → detect skills → persist → match jobs.
//!
//! Extraction failure aborts the request. Store trouble and an empty skill
//! set do not: they are reported as notices on an otherwise successful report.

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::extract::{extract_text, UploadedDocument};
use crate::analysis::matcher::{match_jobs, sort_by_match_desc, MatchResult};
use crate::analysis::skills::{extract_skills, SkillSet};
use crate::analysis::store::AnalysisStore;
use crate::analysis::vocabulary::SkillVocabulary;
use crate::errors::AppError;
use crate::models::job::JobRequirement;
use crate::models::resume::ResumeRecord;

/// Characters of resume text echoed back in the report.
pub const PREVIEW_CHARS: usize = 1000;

/// Non-fatal conditions attached to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisNotice {
    /// Text was extracted but no vocabulary skill was found.
    NoSkillsDetected,
    /// The resume row could not be written.
    ResumeNotSaved,
    /// The job table could not be read; `matches` is empty.
    JobsUnavailable,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub resume_name: String,
    pub skills: SkillSet,
    pub text_preview: String,
    /// Best match first.
    pub matches: Vec<MatchResult>,
    pub notices: Vec<AnalysisNotice>,
}

pub async fn analyze_document(
    store: &dyn AnalysisStore,
    vocabulary: &SkillVocabulary,
    document: &UploadedDocument,
) -> Result<AnalysisReport, AppError> {
    let text = extract_text(document).await?;
    let skills = extract_skills(&text, vocabulary);
    let resume_name = resume_name(Local::now());
    info!(
        "Analyzed {resume_name}: {} chars, {} skills",
        text.len(),
        skills.len()
    );

    let mut notices = Vec::new();

    let record = ResumeRecord::new(&resume_name, &text, &skills);
    if let Err(e) = store.save_resume(&record).await {
        warn!("Could not save {resume_name}: {e}");
        notices.push(AnalysisNotice::ResumeNotSaved);
    }

    let matches = if skills.is_empty() {
        notices.push(AnalysisNotice::NoSkillsDetected);
        Vec::new()
    } else {
        match store.fetch_all_jobs().await {
            Ok(jobs) => ranked_matches(&skills, &jobs),
            Err(e) => {
                warn!("Could not load jobs for {resume_name}: {e}");
                notices.push(AnalysisNotice::JobsUnavailable);
                Vec::new()
            }
        }
    };

    Ok(AnalysisReport {
        resume_name,
        text_preview: text_preview(&text),
        skills,
        matches,
        notices,
    })
}

/// Matches an already-known skill set against every job. Store failure is an error here.
pub async fn match_skills(
    store: &dyn AnalysisStore,
    skills: &SkillSet,
) -> Result<Vec<MatchResult>, AppError> {
    let jobs = store.fetch_all_jobs().await?;
    Ok(ranked_matches(skills, &jobs))
}

fn ranked_matches(skills: &SkillSet, jobs: &[JobRequirement]) -> Vec<MatchResult> {
    let mut matches = match_jobs(skills, jobs);
    sort_by_match_desc(&mut matches);
    matches
}

/// `Resume_YYYYMMDD_HHMMSS`
pub fn resume_name(at: DateTime<Local>) -> String {
    format!("Resume_{}", at.format("%Y%m%d_%H%M%S"))
}

/// First `PREVIEW_CHARS` characters, with `...` appended when cut.
pub fn text_preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
