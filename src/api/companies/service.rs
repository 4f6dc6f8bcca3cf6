use std::sync::Arc;

use chrono::Utc;
use futures_util::future::{try_join, try_join3, try_join_all};
use tracing::info;

use crate::api::error::ServiceError;
use crate::api::jobs::dto::JobSummary;
use crate::db::models::CompanyRow;
use crate::db::JobStore;
use crate::format;
use crate::pagination::{self, Pagination};
use crate::query::{JobFilters, PageWindow};

use super::dto::{CompanyListPage, CompanyProfile, CompanyWithJobCount};

const PROFILE_JOB_LIMIT: i64 = 20;
const VERIFIED_LIMIT: i64 = 50;

pub struct CompanyService {
    store: Arc<dyn JobStore>,
    page_size: u32,
}

impl CompanyService {
    pub fn new(store: Arc<dyn JobStore>, page_size: u32) -> Self {
        Self { store, page_size }
    }

    /// A page of companies, each with its number of active jobs
    ///
    /// Per-company counts are independent reads and run concurrently; any
    /// failure fails the page.
    pub async fn browse(&self, raw_page: Option<&str>) -> Result<CompanyListPage, ServiceError> {
        let page = pagination::normalize_page(raw_page);
        info!("Service: Browsing companies page={}", page);

        let window = PageWindow::for_page(page, self.page_size);
        let all_jobs = JobFilters::default();
        let (companies, total_companies, total_jobs) = try_join3(
            self.store.list_companies(window),
            self.store.count_companies(),
            self.store.count_jobs(&all_jobs),
        )
        .await?;

        let store = &self.store;
        let counts = try_join_all(companies.iter().map(|company| {
            let filters = JobFilters::for_company(company.id);
            async move { store.count_jobs(&filters).await }
        }))
        .await?;

        let companies = companies
            .into_iter()
            .zip(counts)
            .map(|(company, job_count)| CompanyWithJobCount { company, job_count })
            .collect();

        Ok(CompanyListPage {
            companies,
            pagination: Pagination::new(page, self.page_size, total_companies),
            total_jobs,
        })
    }

    /// Company page by slug with its open jobs
    pub async fn profile(&self, slug: &str) -> Result<Option<CompanyProfile>, ServiceError> {
        info!("Service: Fetching company profile slug={}", slug);

        let Some(company) = self.store.get_company_by_slug(slug).await? else {
            return Ok(None);
        };

        let filters = JobFilters::for_company(company.id);
        let (jobs, open_positions) = try_join(
            self.store.list_jobs(&filters, PageWindow::first(PROFILE_JOB_LIMIT)),
            self.store.count_jobs(&filters),
        )
        .await?;

        let description = company
            .description
            .as_deref()
            .filter(|description| !description.trim().is_empty());
        let summary = match description {
            Some(description) => format::excerpt(description),
            None => format!(
                "View remote job opportunities at {}. Browse open positions and apply today.",
                company.name
            ),
        };

        let now = Utc::now();
        Ok(Some(CompanyProfile {
            jobs: jobs.into_iter().map(|job| JobSummary::new(job, now)).collect(),
            company,
            summary,
            open_positions,
        }))
    }

    pub async fn verified(&self) -> Result<Vec<CompanyRow>, ServiceError> {
        Ok(self.store.list_verified_companies(VERIFIED_LIMIT).await?)
    }
}
