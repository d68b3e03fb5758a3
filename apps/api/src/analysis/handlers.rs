//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::extract::UploadedDocument;
use crate::analysis::matcher::MatchResult;
use crate::analysis::pipeline::{analyze_document, match_skills, AnalysisNotice, AnalysisReport};
use crate::analysis::skills::normalize_skills;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchView {
    pub title: String,
    pub company: String,
    pub match_percent: f64,
    pub required_skills: String,
    pub matching_skills: Vec<String>,
    pub matching_skills_csv: String,
}

impl From<MatchResult> for MatchView {
    fn from(result: MatchResult) -> Self {
        Self {
            matching_skills_csv: result.matching_skills_csv(),
            title: result.title,
            company: result.company,
            match_percent: result.match_percent,
            required_skills: result.required_skills,
            matching_skills: result.matching_skills,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub resume_name: String,
    pub skills: Vec<String>,
    pub text_preview: String,
    pub matches: Vec<MatchView>,
    pub notices: Vec<AnalysisNotice>,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            resume_name: report.resume_name,
            skills: report.skills.into_iter().collect(),
            text_preview: report.text_preview,
            matches: report.matches.into_iter().map(MatchView::from).collect(),
            notices: report.notices,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    /// The recognized subset of the requested skills.
    pub skills: Vec<String>,
    pub matches: Vec<MatchView>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Multipart upload with a single `resume` file field. Extracts skills,
/// stores the resume and ranks every job against it.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        if document.is_some() {
            return Err(AppError::Validation(format!(
                "multipart field '{RESUME_FIELD}' must appear exactly once"
            )));
        }

        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        if bytes.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        document = Some(UploadedDocument::new(file_name, content_type, bytes));
    }

    let document = document.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{RESUME_FIELD}' is required"))
    })?;

    let report = analyze_document(state.store.as_ref(), &state.vocabulary, &document).await?;
    Ok(Json(report.into()))
}

/// POST /api/v1/jobs/match
///
/// Ranks every job against a caller-supplied skill list. Unknown skills are ignored.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchListResponse>, AppError> {
    let skills = normalize_skills(&request.skills, &state.vocabulary);
    let matches = match_skills(state.store.as_ref(), &skills).await?;

    Ok(Json(MatchListResponse {
        skills: skills.into_iter().collect(),
        matches: matches.into_iter().map(MatchView::from).collect(),
    }))
}

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.vocabulary.iter().map(String::from).collect(),
    })
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("invalid multipart body: {}", e.body_text()))
    }
}
