use serde::Serialize;

use crate::api::jobs::dto::JobSummary;
use crate::db::models::CompanyRow;
use crate::pagination::Pagination;

#[derive(Debug, Serialize)]
pub struct CompanyWithJobCount {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub job_count: u64,
}

/// Response for the company directory
#[derive(Debug, Serialize)]
pub struct CompanyListPage {
    pub companies: Vec<CompanyWithJobCount>,
    pub pagination: Pagination,
    /// Active jobs across all companies
    pub total_jobs: u64,
}

/// Response for a company page
#[derive(Debug, Serialize)]
pub struct CompanyProfile {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub summary: String,
    pub jobs: Vec<JobSummary>,
    pub open_positions: u64,
}
