use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::shows::ShowResponse;
use super::extract::{JsonBody, Path, Query};
use super::{ApiError, MutationResponse, SearchParams, SearchResponse};
use fyyur_db::entities::venue;
use fyyur_db::input::VenueInput;
use fyyur_db::store::schedule::{self, ShowOwner};
use fyyur_db::store::{shows, venues};
use fyyur_db::AppState;

#[derive(Debug, Serialize)]
pub struct VenueResponse {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<venue::Model> for VenueResponse {
    fn from(v: venue::Model) -> Self {
        Self {
            id: v.id,
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            image_link: v.image_link,
            facebook_link: v.facebook_link,
            website: v.website,
            genres: v.genres.0,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
            created_at: v.created_at,
        }
    }
}

/// Venue as shown in listings and search results.
#[derive(Debug, Serialize)]
pub struct VenueSummary {
    pub id: Uuid,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Serialize)]
pub struct VenueDetailResponse {
    #[serde(flatten)]
    pub venue: VenueResponse,
    pub past_shows: Vec<ShowResponse>,
    pub upcoming_shows: Vec<ShowResponse>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

async fn summarize(
    state: &AppState,
    venue: venue::Model,
    now: DateTime<Utc>,
) -> Result<VenueSummary, ApiError> {
    let num_upcoming_shows =
        schedule::upcoming_shows_count(&state.db, ShowOwner::Venue(venue.id), now).await?;
    Ok(VenueSummary {
        id: venue.id,
        name: venue.name,
        num_upcoming_shows,
    })
}

/// GET /api/venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationResponse>>, ApiError> {
    let now = Utc::now();
    let locations = venues::list_distinct_locations(&state.db).await?;

    let mut data = Vec::with_capacity(locations.len());
    for loc in locations {
        let mut summaries = Vec::with_capacity(loc.venues.len());
        for v in loc.venues {
            summaries.push(summarize(&state, v, now).await?);
        }
        data.push(LocationResponse {
            city: loc.city,
            state: loc.state,
            venues: summaries,
        });
    }
    Ok(Json(data))
}

/// GET /api/venues/search?search_term=
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse<VenueSummary>>, ApiError> {
    let now = Utc::now();
    let results = venues::search(&state.db, &params.search_term).await?;

    let mut data = Vec::with_capacity(results.count);
    for v in results.data {
        data.push(summarize(&state, v, now).await?);
    }
    Ok(Json(SearchResponse {
        search_term: params.search_term,
        count: results.count,
        data,
    }))
}

/// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<VenueDetailResponse>, ApiError> {
    let now = Utc::now();
    let venue = venues::find(&state.db, id).await?;
    let sched = schedule::schedule(&state.db, ShowOwner::Venue(id), now).await?;

    let past_shows: Vec<ShowResponse> = shows::describe(&state.db, sched.past)
        .await?
        .into_iter()
        .map(|l| ShowResponse::from_listing(l, now))
        .collect();
    let upcoming_shows: Vec<ShowResponse> = shows::describe(&state.db, sched.upcoming)
        .await?
        .into_iter()
        .map(|l| ShowResponse::from_listing(l, now))
        .collect();

    Ok(Json(VenueDetailResponse {
        venue: venue.into(),
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// POST /api/venues
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<VenueInput>,
) -> Result<(StatusCode, Json<MutationResponse<VenueResponse>>), ApiError> {
    let created = venues::create(&state.db, body).await?;
    let message = format!("Venue {} was successfully listed!", created.name);
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(message, created.into())),
    ))
}

/// PUT /api/venues/:id
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<VenueInput>,
) -> Result<Json<MutationResponse<VenueResponse>>, ApiError> {
    let updated = venues::update(&state.db, id, body).await?;
    let message = format!("Venue {} was successfully updated!", updated.name);
    Ok(Json(MutationResponse::new(message, updated.into())))
}

/// DELETE /api/venues/:id
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MutationResponse<VenueResponse>>, ApiError> {
    let deleted = venues::delete(&state.db, id).await?;
    let message = format!("Venue {} was successfully deleted!", deleted.name);
    Ok(Json(MutationResponse::new(message, deleted.into())))
}
