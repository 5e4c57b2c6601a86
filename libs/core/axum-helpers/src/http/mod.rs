//! HTTP middleware module.
//!
//! - CORS allow-list enforcement and headers
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{AllowedOrigins, create_cors_layer, origin_guard, security_headers};
//!
//! let allowed = AllowedOrigins::new(["http://localhost:3000"])?;
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn_with_state(allowed.clone(), origin_guard))
//!     .layer(create_cors_layer(&allowed));
//! ```

pub mod cors;
pub mod security;

pub use cors::{AllowedOrigins, create_cors_layer, origin_guard};
pub use security::security_headers;
