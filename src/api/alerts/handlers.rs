use actix_web::{
    delete, get, patch, post,
    web::{scope, Data, Path, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::{Json, Query};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::error::ServiceError;
use crate::db::models::{JobAlertRow, JobAlertUpdate, NewJobAlert};

use super::service::AlertService;

#[derive(Debug, Deserialize, Validate)]
pub struct AlertLookup {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
}

#[derive(Serialize)]
struct AlertResponse {
    message: String,
    alert: JobAlertRow,
}

fn alert_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::not_found(format!("Job alert {}", raw)))
}

#[post("")]
async fn create_alert(
    service: Data<AlertService>,
    alert: Json<NewJobAlert>,
) -> Result<HttpResponse, ServiceError> {
    let alert = service.create(alert.into_inner()).await?;
    Ok(HttpResponse::Created().json(AlertResponse {
        message: "Job alert created successfully".to_string(),
        alert,
    }))
}

#[get("")]
async fn list_alerts(
    service: Data<AlertService>,
    lookup: Query<AlertLookup>,
) -> Result<HttpResponse, ServiceError> {
    let alerts = service.for_email(&lookup.email).await?;
    Ok(HttpResponse::Ok().json(alerts))
}

#[patch("/{id}")]
async fn update_alert(
    service: Data<AlertService>,
    path: Path<String>,
    update: Json<JobAlertUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let id = alert_id(&path)?;
    let alert = service.update(id, update.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AlertResponse {
        message: "Job alert updated successfully".to_string(),
        alert,
    }))
}

#[post("/{id}/deactivate")]
async fn deactivate_alert(
    service: Data<AlertService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let id = alert_id(&path)?;
    let alert = service.deactivate(id).await?;
    Ok(HttpResponse::Ok().json(AlertResponse {
        message: "Job alert deactivated".to_string(),
        alert,
    }))
}

#[delete("/{id}")]
async fn delete_alert(
    service: Data<AlertService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let id = alert_id(&path)?;
    service.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn alert_config(config: &mut ServiceConfig) {
    config.service(
        scope("/alerts")
            .service(create_alert)
            .service(list_alerts)
            .service(update_alert)
            .service(deactivate_alert)
            .service(delete_alert),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::validation;
    use crate::db::InMemoryJobStore;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn service() -> Data<AlertService> {
        Data::new(AlertService::new(Arc::new(InMemoryJobStore::new())))
    }

    macro_rules! alert_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(service())
                    .app_data(validation::json_config())
                    .app_data(validation::query_config())
                    .configure(alert_config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_then_list_by_email() {
        let app = alert_app!();

        let req = test::TestRequest::post()
            .uri("/alerts")
            .set_json(json!({
                "email": "dev@example.com",
                "filters": {"keywords": "rust", "job_types": ["contract"]},
                "frequency": "weekly"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["alert"]["frequency"], "weekly");
        assert_eq!(body["alert"]["is_active"], true);

        let req = test::TestRequest::get()
            .uri("/alerts?email=dev@example.com")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["filters"]["job_types"], json!(["contract"]));
    }

    #[actix_web::test]
    async fn invalid_email_is_rejected_with_field_errors() {
        let app = alert_app!();

        let req = test::TestRequest::post()
            .uri("/alerts")
            .set_json(json!({"email": "not-an-email", "frequency": "daily"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(
            body["fields"]["email"]["errors"][0],
            "Email must be a valid address"
        );
    }

    #[actix_web::test]
    async fn padded_email_is_accepted_and_normalized() {
        let app = alert_app!();

        let req = test::TestRequest::post()
            .uri("/alerts")
            .set_json(json!({"email": " Dev@Example.com ", "frequency": "daily"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["alert"]["email"], "dev@example.com");
    }

    #[actix_web::test]
    async fn unknown_frequency_is_rejected() {
        let app = alert_app!();

        let req = test::TestRequest::post()
            .uri("/alerts")
            .set_json(json!({"email": "a@example.com", "frequency": "hourly"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn patch_deactivate_and_delete() {
        let app = alert_app!();

        let req = test::TestRequest::post()
            .uri("/alerts")
            .set_json(json!({"email": "a@example.com", "frequency": "daily"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["alert"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::patch()
            .uri(&format!("/alerts/{id}"))
            .set_json(json!({"frequency": "weekly"}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["alert"]["frequency"], "weekly");
        assert_eq!(updated["alert"]["email"], "a@example.com");

        let req = test::TestRequest::post()
            .uri(&format!("/alerts/{id}/deactivate"))
            .to_request();
        let deactivated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deactivated["alert"]["is_active"], false);

        let req = test::TestRequest::delete()
            .uri(&format!("/alerts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri(&format!("/alerts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_alert_id_is_404() {
        let app = alert_app!();

        let req = test::TestRequest::delete().uri("/alerts/123").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
