use sqlx::{Postgres, QueryBuilder};

use super::filters::{JobFilters, PageWindow};
use super::predicate::{contains_pattern, Predicate};

/// Job columns plus the owning company's columns prefixed with `company_`
pub const JOB_WITH_COMPANY_COLUMNS: &str = "j.id, j.company_id, j.title, j.description, \
     j.salary_min, j.salary_max, j.location, j.job_type, j.category, j.tags, j.apply_url, \
     j.is_featured, j.is_active, j.posted_at, j.expires_at, j.created_at, j.updated_at, \
     c.name AS company_name, c.slug AS company_slug, c.logo_url AS company_logo_url, \
     c.website AS company_website, c.description AS company_description, \
     c.is_verified AS company_is_verified, c.created_at AS company_created_at, \
     c.updated_at AS company_updated_at";

/// Filtered, ordered, windowed listing joined with companies
///
/// Featured jobs come first, newest first within each group.
pub fn list_jobs(filters: &JobFilters, window: PageWindow) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(JOB_WITH_COMPANY_COLUMNS);
    qb.push(" FROM jobs j JOIN companies c ON c.id = j.company_id");
    push_where(&mut qb, &filters.predicates());
    qb.push(" ORDER BY j.is_featured DESC, j.posted_at DESC, j.id");
    qb.push(" LIMIT ");
    qb.push_bind(window.limit);
    qb.push(" OFFSET ");
    qb.push_bind(window.offset);
    qb
}

/// Row count over the same predicates as [`list_jobs`], no join or window
pub fn count_jobs(filters: &JobFilters) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM jobs j");
    push_where(&mut qb, &filters.predicates());
    qb
}

/// Append ` WHERE p1 AND p2 ...` for a non-empty predicate list
pub fn push_where(qb: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_predicate(qb, predicate);
    }
}

fn push_predicate(qb: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Active => {
            qb.push("j.is_active = TRUE");
        }
        Predicate::CategoryEq(category) => {
            qb.push("j.category = ").push_bind(category.clone());
        }
        Predicate::JobTypeEq(job_type) => {
            qb.push("j.job_type = ").push_bind(*job_type);
        }
        Predicate::LocationContains(location) => {
            qb.push("j.location ILIKE ")
                .push_bind(contains_pattern(location))
                .push(" ESCAPE '\\'");
        }
        Predicate::TextSearch(search) => {
            let pattern = contains_pattern(search);
            qb.push("(j.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR j.description ILIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        Predicate::FeaturedOnly => {
            qb.push("j.is_featured = TRUE");
        }
        Predicate::CompanyEq(company_id) => {
            qb.push("j.company_id = ").push_bind(*company_id);
        }
        Predicate::SalaryAtLeast(min) => {
            qb.push("(j.salary_max IS NULL OR j.salary_max >= ")
                .push_bind(*min)
                .push(")");
        }
        Predicate::SalaryAtMost(max) => {
            qb.push("(j.salary_min IS NULL OR j.salary_min <= ")
                .push_bind(*max)
                .push(")");
        }
    }
}
