use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::api::error::ServiceError;
use crate::db::models::{JobAlertRow, JobAlertUpdate, NewJobAlert};
use crate::db::JobStore;

/// Subscription management for saved-search email alerts
pub struct AlertService {
    store: Arc<dyn JobStore>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AlertService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, alert: NewJobAlert) -> Result<JobAlertRow, ServiceError> {
        let alert = NewJobAlert {
            email: normalize_email(&alert.email),
            ..alert
        };
        let row = self.store.create_job_alert(&alert).await?;
        info!("Service: Created job alert id={} frequency={:?}", row.id, row.frequency);
        Ok(row)
    }

    pub async fn for_email(&self, email: &str) -> Result<Vec<JobAlertRow>, ServiceError> {
        Ok(self
            .store
            .list_job_alerts_by_email(&normalize_email(email))
            .await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: JobAlertUpdate,
    ) -> Result<JobAlertRow, ServiceError> {
        let update = JobAlertUpdate {
            email: update.email.as_deref().map(normalize_email),
            ..update
        };
        self.store
            .update_job_alert(id, &update)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Job alert {}", id)))
    }

    /// Unsubscribe without deleting the saved criteria
    pub async fn deactivate(&self, id: Uuid) -> Result<JobAlertRow, ServiceError> {
        info!("Service: Deactivating job alert id={}", id);
        self.update(
            id,
            JobAlertUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.store.delete_job_alert(id).await? {
            info!("Service: Deleted job alert id={}", id);
            Ok(())
        } else {
            Err(ServiceError::not_found(format!("Job alert {}", id)))
        }
    }
}
