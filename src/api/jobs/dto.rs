use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::models::JobWithCompany;
use crate::format;
use crate::markdown::Block;
use crate::pagination::Pagination;
use crate::query::JobFilters;

/// A listed job with its display labels
#[derive(Debug, Serialize)]
pub struct JobSummary {
    #[serde(flatten)]
    pub job: JobWithCompany,
    pub salary_label: Option<String>,
    pub job_type_label: String,
    pub posted_label: String,
}

impl JobSummary {
    pub fn new(job: JobWithCompany, now: DateTime<Utc>) -> Self {
        JobSummary {
            salary_label: format::salary_range(job.job.salary_min, job.job.salary_max),
            job_type_label: format::job_type_label(job.job.job_type),
            posted_label: format::posted_ago(job.job.posted_at, now),
            job,
        }
    }
}

/// Response for a filtered job listing page
#[derive(Debug, Serialize)]
pub struct JobListPage {
    pub jobs: Vec<JobSummary>,
    pub pagination: Pagination,
    pub filters: JobFilters,
}

/// Response for a single job
#[derive(Debug, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub summary: JobSummary,
    pub description_blocks: Vec<Block>,
    pub related: Vec<JobSummary>,
}
