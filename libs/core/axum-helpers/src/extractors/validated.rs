//! Extractor that runs a request type's rule list before the handler.

use crate::errors::AppError;
use crate::validation::{RequestFields, ValidatedRequest, check, gate};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::{HeaderMap, header},
};
use serde_json::Value;
use std::collections::HashMap;

/// Extracts `T` after its [`ValidatedRequest::RULES`] have passed the gate.
///
/// Path parameters and the JSON body are collected raw, every rule is
/// evaluated, and any failure short-circuits with a 400 listing all failed
/// rules. The handler is never invoked for an invalid request. The body is
/// only read when the request declares a JSON content type; an empty JSON
/// body and any non-JSON body are treated as `null`. A JSON body that does
/// not parse is rejected with `INVALID_JSON`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::Validated;
///
/// async fn get_product(Validated(ProductId(id)): Validated<ProductId>) -> String {
///     format!("Product {}", id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: ValidatedRequest,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without parameters have nothing to collect
        let path: HashMap<String, String> =
            match RawPathParams::from_request_parts(&mut parts, state).await {
                Ok(params) => params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
                Err(_) => HashMap::new(),
            };

        // Only JSON bodies are read; anything else leaves the body rules to fail
        let body = if has_json_content_type(&parts.headers) {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;

            if bytes.iter().all(u8::is_ascii_whitespace) {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::InvalidJson(e.to_string()))?
            }
        } else {
            Value::Null
        };

        let fields = RequestFields::new(path, body);
        gate(check(T::RULES, &fields))?;

        T::from_fields(fields).map(Validated)
    }
}

/// `application/json`, with or without parameters, or any `+json` subtype.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
