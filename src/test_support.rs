use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::db::memory::InMemoryJobStore;
use crate::db::models::{CompanyRow, JobRow, JobType};

pub fn company(name: &str) -> CompanyRow {
    let now = Utc::now();
    CompanyRow {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        logo_url: None,
        website: None,
        description: None,
        is_verified: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn job_at(title: &str, company_id: Uuid, posted_at: DateTime<Utc>) -> JobRow {
    JobRow {
        id: Uuid::new_v4(),
        company_id,
        title: title.to_string(),
        description: format!("About the {title} role"),
        salary_min: None,
        salary_max: None,
        location: Some("Remote".to_string()),
        job_type: JobType::FullTime,
        category: None,
        tags: Vec::new(),
        apply_url: "https://example.com/apply".to_string(),
        is_featured: false,
        is_active: true,
        posted_at,
        expires_at: None,
        created_at: posted_at,
        updated_at: posted_at,
    }
}

pub fn job(title: &str) -> JobRow {
    job_at(title, Uuid::new_v4(), Utc::now())
}

/// Store with one company and `count` active jobs posted a day apart
pub fn seeded_store(count: usize) -> InMemoryJobStore {
    let store = InMemoryJobStore::new();
    let acme = company("Acme");
    store.insert_company(acme.clone());

    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    for i in 0..count {
        let posted = base + Duration::days(i as i64);
        store.insert_job(job_at(&format!("Job {i}"), acme.id, posted));
    }
    store
}
