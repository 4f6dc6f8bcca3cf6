use actix_web::{error::InternalError, HttpResponse};
use serde::Serialize;

/// Uniform error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

fn bad_request(error: &str, fields: serde_json::Map<String, serde_json::Value>) -> actix_web::Error {
    let error_response = ErrorResponse {
        error: error.to_string(),
        fields: serde_json::Value::Object(fields),
    };
    InternalError::from_response("", HttpResponse::BadRequest().json(error_response)).into()
}

fn field_messages(errors: &validator::ValidationErrors) -> serde_json::Map<String, serde_json::Value> {
    let mut fields = serde_json::Map::new();

    for (field, kind) in errors.errors() {
        let messages: Vec<String> = match kind {
            validator::ValidationErrorsKind::Field(errors) => errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Validation error in field: {}", field))
                })
                .collect(),
            validator::ValidationErrorsKind::Struct(nested) => field_messages(nested)
                .into_iter()
                .map(|(inner, _)| format!("Invalid value in field: {}.{}", field, inner))
                .collect(),
            validator::ValidationErrorsKind::List(_) => {
                vec![format!("Validation error in field: {}", field)]
            }
        };
        fields.insert(field.to_string(), serde_json::json!({"errors": messages}));
    }

    fields
}

/// JSON body extractor config with the project-wide error format
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            bad_request("Validation failed", field_messages(&validation_errors))
        }
        actix_web_validator::Error::Deserialize(de_err) => {
            let err_string = de_err.to_string();
            let message = if err_string.contains("EOF while parsing") {
                "Request body is empty. Expected JSON payload"
            } else if err_string.contains("unknown variant") {
                "Invalid enum value. Check allowed values for this field"
            } else {
                "Invalid JSON format"
            };

            let mut fields = serde_json::Map::new();
            fields.insert("message".to_string(), serde_json::json!(message));
            bad_request("Request validation failed", fields)
        }
        _ => {
            let mut fields = serde_json::Map::new();
            fields.insert("message".to_string(), serde_json::json!("Validation error"));
            bad_request("Validation failed", fields)
        }
    })
}

/// Query string extractor config with the project-wide error format
pub fn query_config() -> actix_web_validator::QueryConfig {
    actix_web_validator::QueryConfig::default().error_handler(|err, _req| match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            bad_request("Validation failed", field_messages(&validation_errors))
        }
        _ => {
            let mut fields = serde_json::Map::new();
            fields.insert("message".to_string(), serde_json::json!("Invalid query string"));
            bad_request("Request validation failed", fields)
        }
    })
}
