use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;
use crate::db::StoreError;

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Requested entity does not exist (or is inactive)
    #[error("{0} not found")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Store(e) => {
                // Log the full error, the response stays generic
                error!("Store error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                    fields: serde_json::json!({"message": "Database error occurred"}),
                })
            }
            ServiceError::NotFound(what) => {
                warn!("Not found: {}", what);
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "Not found".to_string(),
                    fields: serde_json::json!({"message": format!("{} not found", what)}),
                })
            }
        }
    }
}
