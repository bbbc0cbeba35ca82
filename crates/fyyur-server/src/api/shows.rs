use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::extract::{JsonBody, Path};
use super::{ApiError, MutationResponse};
use fyyur_db::input::ShowInput;
use fyyur_db::store::schedule::ShowTiming;
use fyyur_db::store::shows::{self, ShowListing};
use fyyur_db::{AppState, StoreError};

#[derive(Debug, Serialize)]
pub struct ShowResponse {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub timing: ShowTiming,
}

impl ShowResponse {
    pub fn from_listing(listing: ShowListing, now: DateTime<Utc>) -> Self {
        let timing = ShowTiming::classify(&listing.show, now);
        Self {
            id: listing.show.id,
            venue_id: listing.show.venue_id,
            venue_name: listing.venue_name,
            venue_image_link: listing.venue_image_link,
            artist_id: listing.show.artist_id,
            artist_name: listing.artist_name,
            artist_image_link: listing.artist_image_link,
            start_time: listing.show.start_time.with_timezone(&Utc),
            timing,
        }
    }
}

/// GET /api/shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowResponse>>, ApiError> {
    let now = Utc::now();
    let all = shows::list(&state.db).await?;
    let listings = shows::describe(&state.db, all).await?;

    Ok(Json(
        listings
            .into_iter()
            .map(|l| ShowResponse::from_listing(l, now))
            .collect(),
    ))
}

/// GET /api/shows/:id
pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShowResponse>, ApiError> {
    let show = shows::find(&state.db, id).await?;
    let listing = shows::describe(&state.db, vec![show])
        .await?
        .pop()
        .ok_or(StoreError::NotFound { entity: "show", id })?;

    Ok(Json(ShowResponse::from_listing(listing, Utc::now())))
}

/// POST /api/shows
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<ShowInput>,
) -> Result<(StatusCode, Json<MutationResponse<ShowResponse>>), ApiError> {
    let created = shows::create(&state.db, body).await?;
    let listing = shows::describe(&state.db, vec![created.clone()])
        .await?
        .pop()
        .ok_or(StoreError::NotFound {
            entity: "show",
            id: created.id,
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(
            "Show was successfully listed!",
            ShowResponse::from_listing(listing, Utc::now()),
        )),
    ))
}
