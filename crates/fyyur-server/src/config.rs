use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// HTTP listener settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Explicit cross-origin allow list. Empty means same-origin only.
    pub cors_origins: Vec<String>,
    pub domain: String,
    pub scheme: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            domain: std::env::var("FYYUR_DOMAIN").unwrap_or_else(|_| "localhost".to_string()),
            scheme: std::env::var("FYYUR_SCHEME").unwrap_or_else(|_| "https".to_string()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// The single origin allowed when no explicit list is configured.
    pub fn default_origin(&self) -> String {
        format!("{}://{}", self.scheme, self.domain)
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let methods = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ];

        let origin = if self.cors_origins.is_empty() {
            tracing::warn!(
                origin = %self.default_origin(),
                "CORS_ORIGINS not set, allowing same-origin requests only"
            );
            AllowOrigin::exact(
                HeaderValue::from_str(&self.default_origin())
                    .unwrap_or_else(|_| HeaderValue::from_static("https://localhost")),
            )
        } else {
            let origins: Vec<HeaderValue> = self
                .cors_origins
                .iter()
                .filter_map(|s| HeaderValue::from_str(s).ok())
                .collect();
            tracing::info!("CORS allowed origins: {:?}", origins);
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(Any)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
