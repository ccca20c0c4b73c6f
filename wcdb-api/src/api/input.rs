//! Turning one request part into validator fields
//!
//! Handlers pick exactly one of these; nothing guesses the source from which
//! part happens to be non-empty.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query};
use serde_json::Value;

use crate::error::ApiError;
use crate::validators::{Fields, ValidationError};

/// Single path parameter as a string field
pub fn path_fields(
    name: &str,
    value: Result<Path<String>, PathRejection>,
) -> Result<Fields, ApiError> {
    let Path(value) = value.map_err(|e| ValidationError::new(e.body_text()))?;

    let mut fields = Fields::new();
    fields.insert(name.to_string(), Value::String(value));
    Ok(fields)
}

/// Query string pairs. A key given more than once becomes an array, which
/// string and number rules then reject.
pub fn query_fields(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Fields, ApiError> {
    let Query(pairs) = query.map_err(|e| ValidationError::new(e.body_text()))?;

    let mut fields = Fields::new();
    for (key, value) in pairs {
        let value = Value::String(value);
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(key, value);
            }
        }
    }
    Ok(fields)
}

/// JSON request body, which must be an object
pub fn body_fields(body: Result<Json<Value>, JsonRejection>) -> Result<Fields, ApiError> {
    match body {
        Ok(Json(Value::Object(fields))) => Ok(fields),
        Ok(Json(_)) => Err(ValidationError::new("Request body must be a JSON object").into()),
        Err(rejection) => Err(ValidationError::new(rejection.body_text()).into()),
    }
}
