use actix_web::{
    get,
    web::{self, Data, Path, Query, ServiceConfig},
    HttpResponse,
};
use serde::Deserialize;

use crate::api::error::ServiceError;

use super::service::CompanyService;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[get("")]
async fn list_companies(
    service: Data<CompanyService>,
    query: Query<PageQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = service.browse(query.page.as_deref()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/verified")]
async fn verified_companies(service: Data<CompanyService>) -> Result<HttpResponse, ServiceError> {
    let companies = service.verified().await?;
    Ok(HttpResponse::Ok().json(companies))
}

#[get("/{slug}")]
async fn company_profile(
    service: Data<CompanyService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let slug = path.into_inner();
    match service.profile(&slug).await? {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(ServiceError::not_found(format!("Company {}", slug))),
    }
}

pub fn company_config(config: &mut ServiceConfig) {
    config.service(
        web::scope("/companies")
            .service(list_companies)
            .service(verified_companies)
            .service(company_profile),
    );
}
