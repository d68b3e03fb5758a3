use serde::{Deserialize, Serialize};

use crate::analysis::skills::SkillSet;

/// One row of the `resumes` table, written once per upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub content: String,
    /// Comma-joined skills, alphabetical.
    pub skills: String,
}

impl ResumeRecord {
    pub fn new(name: impl Into<String>, content: impl Into<String>, skills: &SkillSet) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            skills: skills.iter().map(String::as_str).collect::<Vec<_>>().join(","),
        }
    }
}
