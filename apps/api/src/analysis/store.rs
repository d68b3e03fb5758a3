//! Persistence gateway — the only code that talks to the `resumes` and `jobs` tables.
//!
//! `AppState` holds an `Arc<dyn AnalysisStore>`; `PgAnalysisStore` is the
//! production backend.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::models::job::JobRequirement;
use crate::models::resume::ResumeRecord;

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Inserts one resume row.
    async fn save_resume(&self, record: &ResumeRecord) -> Result<(), sqlx::Error>;

    /// Returns every job posting. Never cached.
    async fn fetch_all_jobs(&self) -> Result<Vec<JobRequirement>, sqlx::Error>;
}

/// PostgreSQL-backed store. Each call checks a connection out of the pool
/// and hands it back when the query future completes or fails.
#[derive(Clone)]
pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn save_resume(&self, record: &ResumeRecord) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO resumes (name, content, skills) VALUES ($1, $2, $3)")
            .bind(&record.name)
            .bind(&record.content)
            .bind(&record.skills)
            .execute(&self.pool)
            .await?;

        info!("Saved resume {} (skills: [{}])", record.name, record.skills);
        Ok(())
    }

    async fn fetch_all_jobs(&self) -> Result<Vec<JobRequirement>, sqlx::Error> {
        let jobs = sqlx::query_as::<_, JobRequirement>(
            "SELECT title, company, skills_required FROM jobs",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} jobs", jobs.len());
        Ok(jobs)
    }
}
