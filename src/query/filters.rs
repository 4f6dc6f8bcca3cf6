use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::models::JobType;
use crate::pagination;

use super::predicate::Predicate;

/// Raw listing parameters exactly as they arrive on the query string
///
/// Every field is kept as an optional string so malformed values can be
/// normalized instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub featured: Option<String>,
}

impl RawJobQuery {
    /// Normalized page number, see [`pagination::normalize_page`]
    pub fn page(&self) -> u32 {
        pagination::normalize_page(self.page.as_deref())
    }

    /// Normalized filter set
    pub fn filters(&self) -> JobFilters {
        JobFilters {
            search: non_blank(self.search.as_deref()),
            category: non_blank(self.category.as_deref()),
            job_type: non_blank(self.job_type.as_deref()).and_then(|t| JobType::parse(&t)),
            location: non_blank(self.location.as_deref()),
            salary_min: parse_amount(self.salary_min.as_deref()),
            salary_max: parse_amount(self.salary_max.as_deref()),
            featured_only: matches!(
                self.featured.as_deref().map(str::trim),
                Some("true" | "1" | "on")
            ),
            company_id: None,
        }
    }
}

/// Optional, conjunctive restrictions on a job listing
///
/// An absent field contributes no predicate at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub featured_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Uuid>,
}

impl JobFilters {
    pub fn for_company(company_id: Uuid) -> Self {
        JobFilters {
            company_id: Some(company_id),
            ..Default::default()
        }
    }

    pub fn featured() -> Self {
        JobFilters {
            featured_only: true,
            ..Default::default()
        }
    }

    pub fn in_category(category: Option<String>) -> Self {
        JobFilters {
            category,
            ..Default::default()
        }
    }

    /// Predicate descriptors for this filter set.
    ///
    /// The listing and the count are both compiled from this list, so the two
    /// can never disagree on which rows match. The active-only predicate is
    /// always first.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::Active];

        if let Some(category) = &self.category {
            predicates.push(Predicate::CategoryEq(category.clone()));
        }
        if let Some(job_type) = self.job_type {
            predicates.push(Predicate::JobTypeEq(job_type));
        }
        if let Some(location) = &self.location {
            predicates.push(Predicate::LocationContains(location.clone()));
        }
        if let Some(search) = &self.search {
            predicates.push(Predicate::TextSearch(search.clone()));
        }
        if self.featured_only {
            predicates.push(Predicate::FeaturedOnly);
        }
        if let Some(company_id) = self.company_id {
            predicates.push(Predicate::CompanyEq(company_id));
        }
        if let Some(salary_min) = self.salary_min {
            predicates.push(Predicate::SalaryAtLeast(salary_min));
        }
        if let Some(salary_max) = self.salary_max {
            predicates.push(Predicate::SalaryAtMost(salary_max));
        }

        predicates
    }
}

/// Row window over an ordered result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    pub fn new(limit: i64, offset: i64) -> Self {
        PageWindow {
            limit: limit.max(0),
            offset: offset.max(0),
        }
    }

    /// First `limit` rows
    pub fn first(limit: i64) -> Self {
        PageWindow::new(limit, 0)
    }

    /// Every row
    pub fn all() -> Self {
        PageWindow::new(i64::MAX, 0)
    }

    /// Window for a 1-based page number
    pub fn for_page(page: u32, page_size: u32) -> Self {
        let page = i64::from(page.max(1));
        let page_size = i64::from(page_size);
        PageWindow::new(page_size, (page - 1).saturating_mul(page_size))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Leading integer of the value; out of `i32` range counts as absent
fn parse_amount(value: Option<&str>) -> Option<i32> {
    value
        .and_then(pagination::leading_integer)
        .and_then(|amount| i32::try_from(amount).ok())
}
