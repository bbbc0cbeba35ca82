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
use fyyur_db::entities::artist;
use fyyur_db::input::ArtistInput;
use fyyur_db::store::schedule::{self, ShowOwner};
use fyyur_db::store::{artists, shows};
use fyyur_db::AppState;

#[derive(Debug, Serialize)]
pub struct ArtistResponse {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<artist::Model> for ArtistResponse {
    fn from(a: artist::Model) -> Self {
        Self {
            id: a.id,
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            genres: a.genres.0,
            image_link: a.image_link,
            facebook_link: a.facebook_link,
            website: a.website,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistListItem {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistSummary {
    pub id: Uuid,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetailResponse {
    #[serde(flatten)]
    pub artist: ArtistResponse,
    pub past_shows: Vec<ShowResponse>,
    pub upcoming_shows: Vec<ShowResponse>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /api/artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistListItem>>, ApiError> {
    let all = artists::list(&state.db).await?;
    Ok(Json(
        all.into_iter()
            .map(|a| ArtistListItem {
                id: a.id,
                name: a.name,
            })
            .collect(),
    ))
}

/// GET /api/artists/search?search_term=
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse<ArtistSummary>>, ApiError> {
    let now = Utc::now();
    let results = artists::search(&state.db, &params.search_term).await?;

    let mut data = Vec::with_capacity(results.count);
    for a in results.data {
        let num_upcoming_shows =
            schedule::upcoming_shows_count(&state.db, ShowOwner::Artist(a.id), now).await?;
        data.push(ArtistSummary {
            id: a.id,
            name: a.name,
            num_upcoming_shows,
        });
    }
    Ok(Json(SearchResponse {
        search_term: params.search_term,
        count: results.count,
        data,
    }))
}

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistDetailResponse>, ApiError> {
    let now = Utc::now();
    let artist = artists::find(&state.db, id).await?;
    let sched = schedule::schedule(&state.db, ShowOwner::Artist(id), now).await?;

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

    Ok(Json(ArtistDetailResponse {
        artist: artist.into(),
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<ArtistInput>,
) -> Result<(StatusCode, Json<MutationResponse<ArtistResponse>>), ApiError> {
    let created = artists::create(&state.db, body).await?;
    let message = format!("Artist {} was successfully listed!", created.name);
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(message, created.into())),
    ))
}

/// PUT /api/artists/:id
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<ArtistInput>,
) -> Result<Json<MutationResponse<ArtistResponse>>, ApiError> {
    let updated = artists::update(&state.db, id, body).await?;
    let message = format!("Artist {} was successfully updated!", updated.name);
    Ok(Json(MutationResponse::new(message, updated.into())))
}

/// DELETE /api/artists/:id
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MutationResponse<ArtistResponse>>, ApiError> {
    let deleted = artists::delete(&state.db, id).await?;
    let message = format!("Artist {} was successfully deleted!", deleted.name);
    Ok(Json(MutationResponse::new(message, deleted.into())))
}
