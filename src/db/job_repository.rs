use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::db::models::{
    CategoryRow, CompanyRow, JobAlertRow, JobAlertUpdate, JobWithCompany, NewJobAlert,
};
use crate::db::store::{JobStore, StoreError, StoreResult};
use crate::query::{sql, JobFilters, PageWindow};

const COMPANY_COLUMNS: &str =
    "id, name, slug, logo_url, website, description, is_verified, created_at, updated_at";
const CATEGORY_COLUMNS: &str = "id, name, slug, icon, created_at";
const ALERT_COLUMNS: &str =
    "id, email, filters, frequency, is_active, last_sent_at, created_at, updated_at";

/// PostgreSQL implementation of [`JobStore`]
#[derive(Clone)]
pub struct JobRepository {
    pool: Pool<Postgres>,
}

impl JobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn list_jobs(
        &self,
        filters: &JobFilters,
        window: PageWindow,
    ) -> StoreResult<Vec<JobWithCompany>> {
        let mut query = sql::list_jobs(filters, window);
        debug!("Listing jobs: {}", query.sql());

        let rows = query
            .build_query_as::<JobWithCompany>()
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch jobs"))?;

        debug!("Fetched {} jobs", rows.len());
        Ok(rows)
    }

    async fn count_jobs(&self, filters: &JobFilters) -> StoreResult<u64> {
        let mut query = sql::count_jobs(filters);
        debug!("Counting jobs: {}", query.sql());

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::database("Failed to count jobs"))?;

        Ok(count.max(0) as u64)
    }

    async fn get_job_by_id(&self, id: Uuid) -> StoreResult<Option<JobWithCompany>> {
        debug!("Fetching job id={}", id);

        let query = format!(
            "SELECT {} FROM jobs j JOIN companies c ON c.id = j.company_id \
             WHERE j.id = $1 AND j.is_active = TRUE",
            sql::JOB_WITH_COMPANY_COLUMNS
        );
        sqlx::query_as::<_, JobWithCompany>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch job"))
    }

    async fn list_companies(&self, window: PageWindow) -> StoreResult<Vec<CompanyRow>> {
        debug!(
            "Listing companies: limit={}, offset={}",
            window.limit, window.offset
        );

        let query = format!(
            "SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name, id LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CompanyRow>(&query)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch companies"))
    }

    async fn count_companies(&self) -> StoreResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::database("Failed to count companies"))?;

        Ok(count.max(0) as u64)
    }

    async fn list_verified_companies(&self, limit: i64) -> StoreResult<Vec<CompanyRow>> {
        let query = format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE is_verified = TRUE ORDER BY name LIMIT $1"
        );
        sqlx::query_as::<_, CompanyRow>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch verified companies"))
    }

    async fn get_company_by_slug(&self, slug: &str) -> StoreResult<Option<CompanyRow>> {
        debug!("Fetching company slug={}", slug);

        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE slug = $1");
        sqlx::query_as::<_, CompanyRow>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch company"))
    }

    async fn list_categories(&self) -> StoreResult<Vec<CategoryRow>> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name");
        sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch categories"))
    }

    async fn get_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRow>> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch category"))
    }

    async fn create_job_alert(&self, alert: &NewJobAlert) -> StoreResult<JobAlertRow> {
        debug!("Creating job alert: frequency={:?}", alert.frequency);

        let query = format!(
            "INSERT INTO job_alerts (email, filters, frequency) VALUES ($1, $2, $3) \
             RETURNING {ALERT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobAlertRow>(&query)
            .bind(&alert.email)
            .bind(Json(&alert.filters))
            .bind(alert.frequency)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::database("Failed to create job alert"))?;

        debug!("Job alert created with id={}", row.id);
        Ok(row)
    }

    async fn list_job_alerts_by_email(&self, email: &str) -> StoreResult<Vec<JobAlertRow>> {
        let query = format!(
            "SELECT {ALERT_COLUMNS} FROM job_alerts \
             WHERE email = $1 AND is_active = TRUE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, JobAlertRow>(&query)
            .bind(email)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database("Failed to fetch job alerts"))
    }

    async fn update_job_alert(
        &self,
        id: Uuid,
        update: &JobAlertUpdate,
    ) -> StoreResult<Option<JobAlertRow>> {
        debug!("Updating job alert id={}", id);

        let query = format!(
            "UPDATE job_alerts SET \
                email = COALESCE($2, email), \
                filters = COALESCE($3, filters), \
                frequency = COALESCE($4, frequency), \
                is_active = COALESCE($5, is_active), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {ALERT_COLUMNS}"
        );
        sqlx::query_as::<_, JobAlertRow>(&query)
            .bind(id)
            .bind(update.email.as_deref())
            .bind(update.filters.as_ref().map(Json))
            .bind(update.frequency)
            .bind(update.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::database("Failed to update job alert"))
    }

    async fn delete_job_alert(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM job_alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::database("Failed to delete job alert"))?;

        debug!("Deleted {} job alerts with id={}", result.rows_affected(), id);
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::database("Database unavailable"))?;
        Ok(())
    }
}
