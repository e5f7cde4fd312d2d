use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DbErr;
use serde_json::json;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Error type returned by every handler.
///
/// Not-found lookups answer with an empty 404, rule violations with a 400
/// listing the offending fields. Store failures are logged and hidden behind a
/// generic 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                tracing::debug!(%what, "Resource not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Validation(errors) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "fields": field_errors(&errors),
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::BadRequest(message) => {
                let body = json!({
                    "error": message,
                    "code": "BAD_REQUEST",
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::Database(DbErr::RecordNotFound(what)) => {
                tracing::debug!(%what, "Record not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    let body = json!({
        "error": "An internal error occurred",
        "code": "INTERNAL_ERROR",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Flatten nested validation errors into `path -> messages`, keyed by the
/// JSON member names of the request body, e.g. `pointsOfInterest[1].name`.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut fields = BTreeMap::new();
    collect_field_errors("", errors, &mut fields);
    fields
}

fn collect_field_errors(
    prefix: &str,
    errors: &ValidationErrors,
    fields: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let field = json_member_name(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                let messages = errs.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                });
                fields.entry(path).or_default().extend(messages);
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(&path, nested, fields);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(&format!("{path}[{index}]"), nested, fields);
                }
            }
        }
    }
}

/// Request bodies are camelCase on the wire: `points_of_interest` becomes
/// `pointsOfInterest`.
fn json_member_name(field: &str) -> String {
    if field.starts_with('_') {
        return field.to_string();
    }

    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}
