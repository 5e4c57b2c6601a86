use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Fixed set of origins permitted to make cross-origin requests.
#[derive(Clone, Debug)]
pub struct AllowedOrigins(Arc<[HeaderValue]>);

impl AllowedOrigins {
    /// Parses every origin into a header value.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the list is empty or an origin is not a valid
    /// header value.
    pub fn new<I, S>(origins: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = origins
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(origin.as_ref()).map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Invalid CORS origin '{}': {}", origin.as_ref(), e),
                    )
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        if values.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CORS allow-list cannot be empty",
            ));
        }

        Ok(Self(values.into()))
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderValue> {
        self.0.iter()
    }
}

/// Creates the CORS layer answering preflights and decorating responses for
/// allowed origins.
///
/// - Methods: GET, POST, PUT, DELETE, PATCH, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(allowed: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.iter().cloned()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Rejects requests whose `Origin` is not on the allow-list with 403.
///
/// Requests without an `Origin` header (same-origin navigation, curl,
/// server-to-server) pass through untouched.
pub async fn origin_guard(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Response {
    let rejected = request
        .headers()
        .get(header::ORIGIN)
        .filter(|origin| !allowed.contains(origin))
        .map(|origin| origin.to_str().unwrap_or("<non-ascii>").to_string());

    if let Some(origin) = rejected {
        tracing::warn!(%origin, method = %request.method(), "Rejected cross-origin request");
        return AppError::Forbidden(format!("Origin {} is not allowed", origin)).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_rejects_empty_list() {
        let err = AllowedOrigins::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_allowed_origins_rejects_invalid_value() {
        let err = AllowedOrigins::new(["http://ok.example", "bad\norigin"]).unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"));
    }

    #[test]
    fn test_allowed_origins_contains_exact_match_only() {
        let allowed = AllowedOrigins::new(["https://shop.example.com"]).unwrap();

        assert!(allowed.contains(&HeaderValue::from_static("https://shop.example.com")));
        assert!(!allowed.contains(&HeaderValue::from_static("https://shop.example.com.evil")));
        assert!(!allowed.contains(&HeaderValue::from_static("http://shop.example.com")));
    }
}
