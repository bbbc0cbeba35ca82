use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::entities::{artist, show, venue};
use crate::error::StoreError;
use crate::input::ShowInput;

const ENTITY: &str = "show";

/// A show joined with the display fields of its venue and artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub show: show::Model,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<show::Model, StoreError> {
    show::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound { entity: ENTITY, id })
}

/// All shows, earliest first.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<show::Model>, StoreError> {
    Ok(show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await?)
}

/// Book an artist at a venue. Both must exist when the transaction runs.
pub async fn create(db: &DatabaseConnection, input: ShowInput) -> Result<show::Model, StoreError> {
    let new_show = input.validated()?;

    let txn = db.begin().await?;
    if venue::Entity::find_by_id(new_show.venue_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(StoreError::MissingReference {
            entity: "venue",
            id: new_show.venue_id,
        });
    }
    if artist::Entity::find_by_id(new_show.artist_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(StoreError::MissingReference {
            entity: "artist",
            id: new_show.artist_id,
        });
    }

    let created = show::ActiveModel {
        id: Set(Uuid::new_v4()),
        venue_id: Set(new_show.venue_id),
        artist_id: Set(new_show.artist_id),
        start_time: Set(new_show.start_time.fixed_offset()),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&txn)
    .await
    .map_err(|e| StoreError::from_write(e, ENTITY, ""))?;
    txn.commit().await?;

    tracing::info!(
        show_id = %created.id,
        venue_id = %created.venue_id,
        artist_id = %created.artist_id,
        start_time = %created.start_time,
        "show created"
    );
    Ok(created)
}

/// Attach venue and artist display fields, keeping the input order.
///
/// Venues and artists are fetched in one batch each.
pub async fn describe<C: ConnectionTrait>(
    db: &C,
    shows: Vec<show::Model>,
) -> Result<Vec<ShowListing>, StoreError> {
    if shows.is_empty() {
        return Ok(Vec::new());
    }

    let venue_ids: Vec<Uuid> = shows
        .iter()
        .map(|s| s.venue_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let artist_ids: Vec<Uuid> = shows
        .iter()
        .map(|s| s.artist_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let venues: HashMap<Uuid, venue::Model> = venue::Entity::find()
        .filter(venue::Column::Id.is_in(venue_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();
    let artists: HashMap<Uuid, artist::Model> = artist::Entity::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(shows
        .into_iter()
        .filter_map(|s| {
            let (Some(v), Some(a)) = (venues.get(&s.venue_id), artists.get(&s.artist_id)) else {
                tracing::warn!(show_id = %s.id, "show references a missing venue or artist");
                return None;
            };
            Some(ShowListing {
                venue_name: v.name.clone(),
                venue_image_link: v.image_link.clone(),
                artist_name: a.name.clone(),
                artist_image_link: a.image_link.clone(),
                show: s,
            })
        })
        .collect())
}
