use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::db::models::{
    CategoryRow, CompanyRow, JobAlertRow, JobAlertUpdate, JobWithCompany, NewJobAlert,
};
use crate::query::{JobFilters, PageWindow};

/// Failure reported by the backing store
///
/// The context names the operation ("Failed to fetch jobs"); the original
/// message is kept alongside it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{context}: {message}")]
    Unavailable {
        context: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Wrap a sqlx error with an operation description, for use with `map_err`
    pub fn database(context: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |source| StoreError::Database { context, source }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access for the job board
///
/// Single-entity lookups return `Ok(None)` when the entity does not exist (or,
/// for jobs, is inactive). An empty listing is a successful result.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Active jobs matching `filters`, featured first then newest first
    async fn list_jobs(
        &self,
        filters: &JobFilters,
        window: PageWindow,
    ) -> StoreResult<Vec<JobWithCompany>>;

    /// Number of active jobs matching `filters`
    async fn count_jobs(&self, filters: &JobFilters) -> StoreResult<u64>;

    async fn get_job_by_id(&self, id: Uuid) -> StoreResult<Option<JobWithCompany>>;

    /// Companies ordered by name
    async fn list_companies(&self, window: PageWindow) -> StoreResult<Vec<CompanyRow>>;

    async fn count_companies(&self) -> StoreResult<u64>;

    async fn list_verified_companies(&self, limit: i64) -> StoreResult<Vec<CompanyRow>>;

    async fn get_company_by_slug(&self, slug: &str) -> StoreResult<Option<CompanyRow>>;

    /// Categories ordered by name
    async fn list_categories(&self) -> StoreResult<Vec<CategoryRow>>;

    async fn get_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRow>>;

    async fn create_job_alert(&self, alert: &NewJobAlert) -> StoreResult<JobAlertRow>;

    /// Active alerts of a subscriber, newest first
    async fn list_job_alerts_by_email(&self, email: &str) -> StoreResult<Vec<JobAlertRow>>;

    async fn update_job_alert(
        &self,
        id: Uuid,
        update: &JobAlertUpdate,
    ) -> StoreResult<Option<JobAlertRow>>;

    /// Returns whether an alert was deleted
    async fn delete_job_alert(&self, id: Uuid) -> StoreResult<bool>;

    /// Round trip to the backing store
    async fn ping(&self) -> StoreResult<()>;
}
