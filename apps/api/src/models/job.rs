use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job posting as stored in the `jobs` table. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobRequirement {
    pub title: String,
    pub company: String,
    /// Comma-delimited, exactly as stored.
    #[sqlx(rename = "skills_required")]
    pub required_skills: String,
}

// Rows come from the store; tests build them directly.
#[cfg(test)]
impl JobRequirement {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        required_skills: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            required_skills: required_skills.into(),
        }
    }
}
