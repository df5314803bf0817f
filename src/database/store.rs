use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::education::{Education, NewEducation};
use crate::models::resume::{NewResume, Resume};
use crate::models::work_experience::{NewWorkExperience, WorkExperience};

/// Persistence capability for the candidate aggregate. Row writes are
/// per-table and sequential; callers own the write order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert_candidate(&self, data: &NewCandidate) -> Result<Candidate>;

    async fn update_candidate(&self, id: i64, data: &NewCandidate) -> Result<Candidate>;

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>>;

    async fn insert_education(&self, candidate_id: i64, entry: &NewEducation)
        -> Result<Education>;

    async fn insert_work_experience(
        &self,
        candidate_id: i64,
        entry: &NewWorkExperience,
    ) -> Result<WorkExperience>;

    async fn insert_resume(&self, candidate_id: i64, file: &NewResume) -> Result<Resume>;

    async fn list_education(&self, candidate_id: i64) -> Result<Vec<Education>>;

    async fn list_work_experience(&self, candidate_id: i64) -> Result<Vec<WorkExperience>>;

    async fn list_resumes(&self, candidate_id: i64) -> Result<Vec<Resume>>;
}

#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert_candidate(&self, data: &NewCandidate) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (first_name, last_name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(candidate)
    }

    async fn update_candidate(&self, id: i64, data: &NewCandidate) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET first_name = $1, last_name = $2, email = $3, phone = $4, address = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(candidate)
    }

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT * FROM candidates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(candidate)
    }

    async fn insert_education(
        &self,
        candidate_id: i64,
        entry: &NewEducation,
    ) -> Result<Education> {
        let education = sqlx::query_as::<_, Education>(
            r#"
            INSERT INTO educations (candidate_id, institution, title, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(&entry.institution)
        .bind(&entry.title)
        .bind(entry.start_date)
        .bind(entry.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(education)
    }

    async fn insert_work_experience(
        &self,
        candidate_id: i64,
        entry: &NewWorkExperience,
    ) -> Result<WorkExperience> {
        let experience = sqlx::query_as::<_, WorkExperience>(
            r#"
            INSERT INTO work_experiences (candidate_id, company, position, description, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(&entry.company)
        .bind(&entry.position)
        .bind(&entry.description)
        .bind(entry.start_date)
        .bind(entry.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(experience)
    }

    async fn insert_resume(&self, candidate_id: i64, file: &NewResume) -> Result<Resume> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (candidate_id, file_path, file_type)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(&file.file_path)
        .bind(&file.file_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(resume)
    }

    async fn list_education(&self, candidate_id: i64) -> Result<Vec<Education>> {
        let rows = sqlx::query_as::<_, Education>(
            r#"
            SELECT * FROM educations
            WHERE candidate_id = $1
            ORDER BY start_date ASC, id ASC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_work_experience(&self, candidate_id: i64) -> Result<Vec<WorkExperience>> {
        let rows = sqlx::query_as::<_, WorkExperience>(
            r#"
            SELECT * FROM work_experiences
            WHERE candidate_id = $1
            ORDER BY start_date ASC, id ASC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_resumes(&self, candidate_id: i64) -> Result<Vec<Resume>> {
        let rows = sqlx::query_as::<_, Resume>(
            r#"
            SELECT * FROM resumes
            WHERE candidate_id = $1
            ORDER BY upload_date ASC, id ASC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
