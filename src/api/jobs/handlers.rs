use actix_web::{
    get,
    web::{Data, Path, Query, ServiceConfig},
    HttpResponse,
};
use uuid::Uuid;

use crate::api::error::ServiceError;
use crate::query::RawJobQuery;

use super::service::JobService;

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    query: Query<RawJobQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = service.browse(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/featured")]
async fn featured_jobs(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let jobs = service.featured().await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/{id}")]
async fn job_detail(
    service: Data<JobService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let raw_id = path.into_inner();
    // a malformed id cannot name an existing job
    let Ok(id) = Uuid::parse_str(&raw_id) else {
        return Err(ServiceError::not_found(format!("Job {}", raw_id)));
    };

    match service.detail(id).await? {
        Some(detail) => Ok(HttpResponse::Ok().json(detail)),
        None => Err(ServiceError::not_found(format!("Job {}", id))),
    }
}

#[get("")]
async fn list_categories(service: Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let categories = service.categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/{slug}")]
async fn category_detail(
    service: Data<JobService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let slug = path.into_inner();
    match service.category(&slug).await? {
        Some(category) => Ok(HttpResponse::Ok().json(category)),
        None => Err(ServiceError::not_found(format!("Category {}", slug))),
    }
}

pub fn job_config(config: &mut ServiceConfig) {
    config
        .service(
            actix_web::web::scope("/jobs")
                .service(list_jobs)
                .service(featured_jobs)
                .service(job_detail),
        )
        .service(
            actix_web::web::scope("/categories")
                .service(list_categories)
                .service(category_detail),
        );
}
