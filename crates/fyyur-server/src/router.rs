use axum::{
    http::{header, HeaderName, HeaderValue, Uri},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api::{self, ApiError};
use fyyur_db::AppState;

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/venues",
            get(api::venues::list_venues).post(api::venues::create_venue),
        )
        .route("/venues/search", get(api::venues::search_venues))
        .route(
            "/venues/{id}",
            get(api::venues::get_venue)
                .put(api::venues::update_venue)
                .delete(api::venues::delete_venue),
        )
        .route(
            "/artists",
            get(api::artists::list_artists).post(api::artists::create_artist),
        )
        .route("/artists/search", get(api::artists::search_artists))
        .route(
            "/artists/{id}",
            get(api::artists::get_artist)
                .put(api::artists::update_artist)
                .delete(api::artists::delete_artist),
        )
        .route(
            "/shows",
            get(api::shows::list_shows).post(api::shows::create_show),
        )
        .route("/shows/{id}", get(api::shows::get_show))
}

/// Assemble the full application router.
pub fn build(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use fyyur_db::sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = Arc::new(AppState {
            db: DatabaseConnection::Disconnected,
        });
        build(state, CorsLayer::new())
    }

    #[tokio::test]
    async fn test_healthz() {
        let resp = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let resp = app()
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_before_db() {
        let resp = app()
            .oneshot(
                Request::get("/api/venues/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"][0]["field"], "path");
    }
}
