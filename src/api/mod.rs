pub mod alerts;
pub mod companies;
pub mod error;
pub mod health;
pub mod jobs;
pub mod validation;

use std::sync::Arc;

use actix_web::web::{Data, ServiceConfig};

use crate::db::JobStore;

/// Shared application data for every worker of the HTTP server
#[derive(Clone)]
pub struct Services {
    store: Data<dyn JobStore>,
    jobs: Data<jobs::JobService>,
    companies: Data<companies::CompanyService>,
    alerts: Data<alerts::AlertService>,
}

impl Services {
    pub fn new(store: Arc<dyn JobStore>, jobs_per_page: u32, companies_per_page: u32) -> Self {
        Self {
            jobs: Data::new(jobs::JobService::new(store.clone(), jobs_per_page)),
            companies: Data::new(companies::CompanyService::new(
                store.clone(),
                companies_per_page,
            )),
            alerts: Data::new(alerts::AlertService::new(store.clone())),
            store: Data::from(store),
        }
    }

    /// Register app data, extractor configs and all routes
    pub fn register(&self, cfg: &mut ServiceConfig) {
        cfg.app_data(self.store.clone())
            .app_data(self.jobs.clone())
            .app_data(self.companies.clone())
            .app_data(self.alerts.clone())
            .app_data(validation::json_config())
            .app_data(validation::query_config())
            .configure(health::health_config)
            .configure(jobs::job_config)
            .configure(companies::company_config)
            .configure(alerts::alert_config);
    }
}
