use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join;
use tracing::info;
use uuid::Uuid;

use crate::api::error::ServiceError;
use crate::db::models::CategoryRow;
use crate::db::JobStore;
use crate::markdown;
use crate::pagination::Pagination;
use crate::query::{JobFilters, PageWindow, RawJobQuery};

use super::dto::{JobDetail, JobListPage, JobSummary};

const FEATURED_LIMIT: i64 = 6;
const RELATED_LIMIT: usize = 3;

/// Job browsing: listings, detail pages and the category vocabulary
pub struct JobService {
    store: Arc<dyn JobStore>,
    page_size: u32,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>, page_size: u32) -> Self {
        Self { store, page_size }
    }

    /// One page of active jobs matching the query, with navigation
    ///
    /// The listing and the count are fetched concurrently; if either fails the
    /// whole page fails.
    pub async fn browse(&self, query: &RawJobQuery) -> Result<JobListPage, ServiceError> {
        let page = query.page();
        let filters = query.filters();
        info!("Service: Browsing jobs page={} filters={:?}", page, filters);

        let window = PageWindow::for_page(page, self.page_size);
        let (jobs, total) = try_join(
            self.store.list_jobs(&filters, window),
            self.store.count_jobs(&filters),
        )
        .await?;

        info!("Service: Found {} matching jobs, returning {}", total, jobs.len());

        let now = Utc::now();
        Ok(JobListPage {
            jobs: jobs.into_iter().map(|job| JobSummary::new(job, now)).collect(),
            pagination: Pagination::new(page, self.page_size, total),
            filters,
        })
    }

    pub async fn featured(&self) -> Result<Vec<JobSummary>, ServiceError> {
        let jobs = self
            .store
            .list_jobs(&JobFilters::featured(), PageWindow::first(FEATURED_LIMIT))
            .await?;

        let now = Utc::now();
        Ok(jobs.into_iter().map(|job| JobSummary::new(job, now)).collect())
    }

    /// Job with rendered description and related jobs from the same category
    pub async fn detail(&self, id: Uuid) -> Result<Option<JobDetail>, ServiceError> {
        info!("Service: Fetching job detail id={}", id);

        let Some(job) = self.store.get_job_by_id(id).await? else {
            return Ok(None);
        };

        let related_filters = JobFilters::in_category(job.job.category.clone());
        let related = self
            .store
            .list_jobs(&related_filters, PageWindow::first(RELATED_LIMIT as i64 + 1))
            .await?;

        let now = Utc::now();
        let related = related
            .into_iter()
            .filter(|candidate| candidate.job.id != job.job.id)
            .take(RELATED_LIMIT)
            .map(|job| JobSummary::new(job, now))
            .collect();

        Ok(Some(JobDetail {
            description_blocks: markdown::render(&job.job.description),
            summary: JobSummary::new(job, now),
            related,
        }))
    }

    pub async fn categories(&self) -> Result<Vec<CategoryRow>, ServiceError> {
        Ok(self.store.list_categories().await?)
    }

    pub async fn category(&self, slug: &str) -> Result<Option<CategoryRow>, ServiceError> {
        Ok(self.store.get_category_by_slug(slug).await?)
    }
}
