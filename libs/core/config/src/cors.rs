use crate::server::ServerConfig;
use crate::{env_required, ConfigError, FromEnv};

/// Cross-origin allow-list settings.
///
/// The allow-list is the configured frontend URL plus the server's own local
/// origin, see [`CorsConfig::allowed_origins`].
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub frontend_url: String,
}

impl CorsConfig {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into(),
        }
    }

    /// Origins allowed to make cross-origin requests, deduplicated and
    /// without trailing slashes (browsers never send one in `Origin`).
    pub fn allowed_origins(&self, server: &ServerConfig) -> Vec<String> {
        let local = server.local_origin();
        let mut origins = Vec::with_capacity(2);
        for origin in [self.frontend_url.as_str(), local.as_str()] {
            let origin = origin.trim().trim_end_matches('/').to_string();
            if !origin.is_empty() && !origins.contains(&origin) {
                origins.push(origin);
            }
        }
        origins
    }
}

impl FromEnv for CorsConfig {
    /// Requires FRONTEND_URL to be set (no default)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_required("FRONTEND_URL")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_config_from_env_missing() {
        temp_env::with_var_unset("FRONTEND_URL", || {
            let err = CorsConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("FRONTEND_URL"));
        });
    }

    #[test]
    fn test_allowed_origins_include_local_origin() {
        let cors = CorsConfig::new("https://shop.example.com/");
        let server = ServerConfig::new("0.0.0.0".to_string(), 4000);

        assert_eq!(
            cors.allowed_origins(&server),
            vec![
                "https://shop.example.com".to_string(),
                "http://localhost:4000".to_string()
            ]
        );
    }

    #[test]
    fn test_allowed_origins_deduplicates() {
        let cors = CorsConfig::new("http://localhost:8080");
        let server = ServerConfig::default();

        assert_eq!(cors.allowed_origins(&server), vec!["http://localhost:8080"]);
    }
}
