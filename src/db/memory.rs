use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::models::{
    CategoryRow, CompanyRow, JobAlertRow, JobAlertUpdate, JobRow, JobWithCompany, NewJobAlert,
};
use crate::db::store::{JobStore, StoreError, StoreResult};
use crate::query::predicate::matches_all;
use crate::query::{JobFilters, PageWindow};

#[derive(Default)]
struct Tables {
    companies: Vec<CompanyRow>,
    categories: Vec<CategoryRow>,
    jobs: Vec<JobRow>,
    alerts: Vec<JobAlertRow>,
}

/// [`JobStore`] over in-process tables
///
/// Evaluates the same predicate descriptors the Postgres repository compiles
/// to SQL. A failure can be injected with [`InMemoryJobStore::fail_with`], after
/// which every operation reports it.
#[derive(Default)]
pub struct InMemoryJobStore {
    tables: RwLock<Tables>,
    failure: RwLock<Option<String>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    pub fn insert_company(&self, company: CompanyRow) {
        self.write().companies.push(company);
    }

    pub fn insert_category(&self, category: CategoryRow) {
        self.write().categories.push(category);
    }

    /// Insert a job; returns `false` (and stores nothing) when its company is unknown
    pub fn insert_job(&self, job: JobRow) -> bool {
        let mut tables = self.write();
        if !tables.companies.iter().any(|c| c.id == job.company_id) {
            warn!("Rejecting job {} for unknown company {}", job.id, job.company_id);
            return false;
        }
        tables.jobs.push(job);
        true
    }

    /// Ordered, windowed listing without going through the async trait
    pub fn select_jobs(&self, filters: &JobFilters, window: PageWindow) -> Vec<JobWithCompany> {
        let tables = self.read();
        let predicates = filters.predicates();

        let mut matching: Vec<&JobRow> = tables
            .jobs
            .iter()
            .filter(|job| matches_all(&predicates, job))
            .collect();
        matching.sort_by(|a, b| {
            b.is_featured
                .cmp(&a.is_featured)
                .then(b.posted_at.cmp(&a.posted_at))
                .then(a.id.cmp(&b.id))
        });

        matching
            .into_iter()
            .skip(to_usize(window.offset))
            .take(to_usize(window.limit))
            .filter_map(|job| {
                let company = tables.companies.iter().find(|c| c.id == job.company_id)?;
                Some(JobWithCompany {
                    job: job.clone(),
                    company: company.clone(),
                })
            })
            .collect()
    }

    /// Count over the same predicates as [`InMemoryJobStore::select_jobs`]
    pub fn tally_jobs(&self, filters: &JobFilters) -> u64 {
        let predicates = filters.predicates();
        self.read()
            .jobs
            .iter()
            .filter(|job| matches_all(&predicates, job))
            .count() as u64
    }

    fn check(&self, context: &'static str) -> StoreResult<()> {
        match self.failure.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            Some(message) => Err(StoreError::Unavailable {
                context,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

fn sorted_by_name(mut companies: Vec<CompanyRow>) -> Vec<CompanyRow> {
    companies.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    companies
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn list_jobs(
        &self,
        filters: &JobFilters,
        window: PageWindow,
    ) -> StoreResult<Vec<JobWithCompany>> {
        self.check("Failed to fetch jobs")?;
        Ok(self.select_jobs(filters, window))
    }

    async fn count_jobs(&self, filters: &JobFilters) -> StoreResult<u64> {
        self.check("Failed to count jobs")?;
        Ok(self.tally_jobs(filters))
    }

    async fn get_job_by_id(&self, id: Uuid) -> StoreResult<Option<JobWithCompany>> {
        self.check("Failed to fetch job")?;
        let tables = self.read();
        let found = tables
            .jobs
            .iter()
            .find(|job| job.id == id && job.is_active)
            .and_then(|job| {
                let company = tables.companies.iter().find(|c| c.id == job.company_id)?;
                Some(JobWithCompany {
                    job: job.clone(),
                    company: company.clone(),
                })
            });
        Ok(found)
    }

    async fn list_companies(&self, window: PageWindow) -> StoreResult<Vec<CompanyRow>> {
        self.check("Failed to fetch companies")?;
        let companies = sorted_by_name(self.read().companies.clone());
        Ok(companies
            .into_iter()
            .skip(to_usize(window.offset))
            .take(to_usize(window.limit))
            .collect())
    }

    async fn count_companies(&self) -> StoreResult<u64> {
        self.check("Failed to count companies")?;
        Ok(self.read().companies.len() as u64)
    }

    async fn list_verified_companies(&self, limit: i64) -> StoreResult<Vec<CompanyRow>> {
        self.check("Failed to fetch verified companies")?;
        let verified = self
            .read()
            .companies
            .iter()
            .filter(|c| c.is_verified)
            .cloned()
            .collect();
        Ok(sorted_by_name(verified)
            .into_iter()
            .take(to_usize(limit))
            .collect())
    }

    async fn get_company_by_slug(&self, slug: &str) -> StoreResult<Option<CompanyRow>> {
        self.check("Failed to fetch company")?;
        Ok(self.read().companies.iter().find(|c| c.slug == slug).cloned())
    }

    async fn list_categories(&self) -> StoreResult<Vec<CategoryRow>> {
        self.check("Failed to fetch categories")?;
        let mut categories = self.read().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category_by_slug(&self, slug: &str) -> StoreResult<Option<CategoryRow>> {
        self.check("Failed to fetch category")?;
        Ok(self.read().categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn create_job_alert(&self, alert: &NewJobAlert) -> StoreResult<JobAlertRow> {
        self.check("Failed to create job alert")?;
        let now = Utc::now();
        let row = JobAlertRow {
            id: Uuid::new_v4(),
            email: alert.email.clone(),
            filters: Json(alert.filters.clone()),
            frequency: alert.frequency,
            is_active: true,
            last_sent_at: None,
            created_at: now,
            updated_at: now,
        };
        self.write().alerts.push(row.clone());
        debug!("Job alert created with id={}", row.id);
        Ok(row)
    }

    async fn list_job_alerts_by_email(&self, email: &str) -> StoreResult<Vec<JobAlertRow>> {
        self.check("Failed to fetch job alerts")?;
        let mut alerts: Vec<JobAlertRow> = self
            .read()
            .alerts
            .iter()
            .filter(|a| a.email == email && a.is_active)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    async fn update_job_alert(
        &self,
        id: Uuid,
        update: &JobAlertUpdate,
    ) -> StoreResult<Option<JobAlertRow>> {
        self.check("Failed to update job alert")?;
        let mut tables = self.write();
        let Some(alert) = tables.alerts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(email) = &update.email {
            alert.email = email.clone();
        }
        if let Some(filters) = &update.filters {
            alert.filters = Json(filters.clone());
        }
        if let Some(frequency) = update.frequency {
            alert.frequency = frequency;
        }
        if let Some(is_active) = update.is_active {
            alert.is_active = is_active;
        }
        alert.updated_at = Utc::now();

        Ok(Some(alert.clone()))
    }

    async fn delete_job_alert(&self, id: Uuid) -> StoreResult<bool> {
        self.check("Failed to delete job alert")?;
        let mut tables = self.write();
        let before = tables.alerts.len();
        tables.alerts.retain(|a| a.id != id);
        Ok(tables.alerts.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check("Database unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{AlertFilters, AlertFrequency};
    use crate::test_support::{company, job_at, seeded_store};
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn featured_jobs_sort_first_then_newest() {
        let store = InMemoryJobStore::new();
        let acme = company("Acme");
        store.insert_company(acme.clone());

        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut old_featured = job_at("old featured", acme.id, base);
        old_featured.is_featured = true;
        let new_plain = job_at("new plain", acme.id, base + Duration::days(10));
        let mut new_featured = job_at("new featured", acme.id, base + Duration::days(5));
        new_featured.is_featured = true;
        let old_plain = job_at("old plain", acme.id, base + Duration::days(1));

        for job in [old_featured, new_plain, new_featured, old_plain] {
            assert!(store.insert_job(job));
        }

        let titles: Vec<String> = store
            .list_jobs(&JobFilters::default(), PageWindow::all())
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.job.title)
            .collect();

        assert_eq!(
            titles,
            vec!["new featured", "old featured", "new plain", "old plain"]
        );
    }

    #[tokio::test]
    async fn window_slices_the_ordered_result() {
        let store = seeded_store(25);
        let all = store
            .list_jobs(&JobFilters::default(), PageWindow::all())
            .await
            .unwrap();
        let page = store
            .list_jobs(&JobFilters::default(), PageWindow::for_page(2, 10))
            .await
            .unwrap();

        assert_eq!(page.len(), 10);
        assert_eq!(page[0], all[10]);

        let past_end = store
            .list_jobs(&JobFilters::default(), PageWindow::for_page(9, 10))
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn inactive_jobs_are_hidden_everywhere() {
        let store = InMemoryJobStore::new();
        let acme = company("Acme");
        store.insert_company(acme.clone());
        let mut hidden = job_at("hidden", acme.id, Utc::now());
        hidden.is_active = false;
        let hidden_id = hidden.id;
        store.insert_job(hidden);

        assert_eq!(store.count_jobs(&JobFilters::default()).await.unwrap(), 0);
        assert!(store.get_job_by_id(hidden_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn jobs_for_unknown_companies_are_rejected() {
        let store = InMemoryJobStore::new();
        assert!(!store.insert_job(job_at("orphan", Uuid::new_v4(), Utc::now())));
        assert_eq!(store.tally_jobs(&JobFilters::default()), 0);
    }

    #[tokio::test]
    async fn injected_failure_carries_context_and_message() {
        let store = seeded_store(3);
        store.fail_with("connection reset");

        let err = store.count_jobs(&JobFilters::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to count jobs: connection reset");
        assert!(store.list_categories().await.is_err());
    }

    #[tokio::test]
    async fn alert_lifecycle() {
        let store = InMemoryJobStore::new();
        let alert = store
            .create_job_alert(&NewJobAlert {
                email: "dev@example.com".into(),
                filters: AlertFilters::default(),
                frequency: AlertFrequency::Weekly,
            })
            .await
            .unwrap();
        assert!(alert.is_active);

        let updated = store
            .update_job_alert(
                alert.id,
                &JobAlertUpdate {
                    frequency: Some(AlertFrequency::Daily),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.frequency, AlertFrequency::Daily);
        assert_eq!(updated.email, "dev@example.com");

        store
            .update_job_alert(
                alert.id,
                &JobAlertUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(store
            .list_job_alerts_by_email("dev@example.com")
            .await
            .unwrap()
            .is_empty());

        assert!(store.delete_job_alert(alert.id).await.unwrap());
        assert!(!store.delete_job_alert(alert.id).await.unwrap());
        assert!(store
            .update_job_alert(alert.id, &JobAlertUpdate::default())
            .await
            .unwrap()
            .is_none());
    }
}
