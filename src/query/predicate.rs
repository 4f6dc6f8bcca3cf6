use uuid::Uuid;

use crate::db::models::{JobRow, JobType};

/// One filter condition over the jobs relation
///
/// Backends compile a list of these conjunctively: every predicate in the
/// list must hold for a row to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Job is active
    Active,
    /// Category slug equals the value
    CategoryEq(String),
    JobTypeEq(JobType),
    /// Location contains the value, case-insensitively
    LocationContains(String),
    /// Title or description contains the value, case-insensitively
    TextSearch(String),
    FeaturedOnly,
    CompanyEq(Uuid),
    /// Upper salary bound is at least the value; an unset bound matches
    SalaryAtLeast(i32),
    /// Lower salary bound is at most the value; an unset bound matches
    SalaryAtMost(i32),
}

impl Predicate {
    /// Evaluate against a single row
    pub fn matches(&self, job: &JobRow) -> bool {
        match self {
            Predicate::Active => job.is_active,
            Predicate::CategoryEq(category) => job.category.as_deref() == Some(category.as_str()),
            Predicate::JobTypeEq(job_type) => job.job_type == *job_type,
            Predicate::LocationContains(needle) => job
                .location
                .as_deref()
                .is_some_and(|location| contains_ignore_case(location, needle)),
            Predicate::TextSearch(needle) => {
                contains_ignore_case(&job.title, needle)
                    || contains_ignore_case(&job.description, needle)
            }
            Predicate::FeaturedOnly => job.is_featured,
            Predicate::CompanyEq(company_id) => job.company_id == *company_id,
            Predicate::SalaryAtLeast(min) => job.salary_max.map_or(true, |max| max >= *min),
            Predicate::SalaryAtMost(max) => job.salary_min.map_or(true, |min| min <= *max),
        }
    }
}

/// True when every predicate holds for the row
pub fn matches_all(predicates: &[Predicate], job: &JobRow) -> bool {
    predicates.iter().all(|p| p.matches(job))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Escape `\`, `%` and `_` so user input matches literally inside a LIKE
/// pattern using `ESCAPE '\'`.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `%input%` with pattern characters escaped
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::job;

    #[test]
    fn escape_like_escapes_wildcards_and_backslash() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("c_sharp"), "c\\_sharp");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn inactive_jobs_never_match_active() {
        let mut row = job("Rust Engineer");
        assert!(Predicate::Active.matches(&row));
        row.is_active = false;
        assert!(!Predicate::Active.matches(&row));
    }

    #[test]
    fn text_search_checks_title_or_description_case_insensitively() {
        let mut row = job("Senior RUST Engineer");
        row.description = "Work on the Postgres layer".to_string();

        assert!(Predicate::TextSearch("rust".into()).matches(&row));
        assert!(Predicate::TextSearch("postgres".into()).matches(&row));
        assert!(!Predicate::TextSearch("golang".into()).matches(&row));
    }

    #[test]
    fn text_search_treats_wildcards_literally() {
        let row = job("Backend Engineer");
        assert!(!Predicate::TextSearch("%".into()).matches(&row));
        assert!(!Predicate::TextSearch("_".into()).matches(&row));
    }

    #[test]
    fn location_filter_never_matches_missing_location() {
        let mut row = job("Engineer");
        row.location = None;
        assert!(!Predicate::LocationContains("berlin".into()).matches(&row));
        row.location = Some("Remote - Berlin, DE".into());
        assert!(Predicate::LocationContains("berlin".into()).matches(&row));
    }

    #[test]
    fn salary_min_only_job_against_both_bounds() {
        let mut row = job("Engineer");
        row.salary_min = Some(80000);
        row.salary_max = None;

        // lower bound 80k <= 90k
        assert!(Predicate::SalaryAtMost(90000).matches(&row));
        assert!(!Predicate::SalaryAtMost(70000).matches(&row));
        // open-ended upper bound satisfies any requested minimum
        assert!(Predicate::SalaryAtLeast(70000).matches(&row));
        assert!(Predicate::SalaryAtLeast(500000).matches(&row));
    }

    #[test]
    fn salary_max_only_job_against_both_bounds() {
        let mut row = job("Engineer");
        row.salary_min = None;
        row.salary_max = Some(60000);

        assert!(Predicate::SalaryAtLeast(50000).matches(&row));
        assert!(!Predicate::SalaryAtLeast(70000).matches(&row));
        // open-ended lower bound satisfies any requested maximum
        assert!(Predicate::SalaryAtMost(10000).matches(&row));
    }

    #[test]
    fn job_without_salary_matches_salary_filters() {
        let mut row = job("Engineer");
        row.salary_min = None;
        row.salary_max = None;
        assert!(Predicate::SalaryAtLeast(100000).matches(&row));
        assert!(Predicate::SalaryAtMost(1).matches(&row));
    }

    #[test]
    fn matches_all_is_conjunctive() {
        let mut row = job("Rust Engineer");
        row.category = Some("engineering".into());
        let predicates = vec![
            Predicate::Active,
            Predicate::CategoryEq("engineering".into()),
            Predicate::FeaturedOnly,
        ];

        row.is_featured = false;
        assert!(!matches_all(&predicates, &row));
        row.is_featured = true;
        assert!(matches_all(&predicates, &row));
    }
}
