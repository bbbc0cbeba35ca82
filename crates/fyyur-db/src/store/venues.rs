use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use super::{name_contains, SearchResults};
use crate::entities::{show, venue, Genres};
use crate::error::StoreError;
use crate::input::VenueInput;

const ENTITY: &str = "venue";

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub venues: Vec<venue::Model>,
}

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<venue::Model, StoreError> {
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound { entity: ENTITY, id })
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<venue::Model>, StoreError> {
    Ok(venue::Entity::find()
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?)
}

/// Case-insensitive substring search on the venue name.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<SearchResults<venue::Model>, StoreError> {
    let venues = venue::Entity::find()
        .filter(name_contains(venue::Column::Name, term))
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;
    Ok(SearchResults::new(venues))
}

/// Every distinct (city, state) pair with the venues located there.
pub async fn list_distinct_locations<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<Location>, StoreError> {
    let venues = venue::Entity::find().all(db).await?;
    Ok(group_by_location(venues))
}

/// Group venues by exact (city, state), ordered by state, city, then name.
pub fn group_by_location(mut venues: Vec<venue::Model>) -> Vec<Location> {
    venues.sort_by(|a, b| {
        (&a.state, &a.city, &a.name).cmp(&(&b.state, &b.city, &b.name))
    });

    let mut locations: Vec<Location> = Vec::new();
    for v in venues {
        match locations.last_mut() {
            Some(loc) if loc.city == v.city && loc.state == v.state => loc.venues.push(v),
            _ => locations.push(Location {
                city: v.city.clone(),
                state: v.state.clone(),
                venues: vec![v],
            }),
        }
    }
    locations
}

pub async fn create(db: &DatabaseConnection, input: VenueInput) -> Result<venue::Model, StoreError> {
    let input = input.validated()?;
    let name = input.name.clone();

    let txn = db.begin().await?;
    ensure_name_free(&txn, &name, None).await?;

    let mut active = venue::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };
    apply(&mut active, input);

    let created = active
        .insert(&txn)
        .await
        .map_err(|e| StoreError::from_write(e, ENTITY, &name))?;
    txn.commit().await?;

    tracing::info!(venue_id = %created.id, name = %created.name, "venue created");
    Ok(created)
}

/// Replace every editable field of a venue.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    input: VenueInput,
) -> Result<venue::Model, StoreError> {
    let input = input.validated()?;
    let name = input.name.clone();

    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;
    ensure_name_free(&txn, &name, Some(id)).await?;

    let mut active: venue::ActiveModel = existing.into();
    apply(&mut active, input);

    let updated = active
        .update(&txn)
        .await
        .map_err(|e| StoreError::from_write(e, ENTITY, &name))?;
    txn.commit().await?;

    tracing::info!(venue_id = %updated.id, "venue updated");
    Ok(updated)
}

/// Delete a venue together with its shows.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<venue::Model, StoreError> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;

    let removed = show::Entity::delete_many()
        .filter(show::Column::VenueId.eq(id))
        .exec(&txn)
        .await?;
    venue::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        venue_id = %id,
        shows_removed = removed.rows_affected,
        "venue deleted"
    );
    Ok(existing)
}

async fn ensure_name_free<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except: Option<Uuid>,
) -> Result<(), StoreError> {
    let mut query = venue::Entity::find().filter(venue::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(venue::Column::Id.ne(id));
    }
    match query.one(db).await? {
        Some(_) => Err(StoreError::DuplicateName {
            entity: ENTITY,
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

fn apply(active: &mut venue::ActiveModel, input: VenueInput) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website = Set(input.website);
    active.genres = Set(Genres(input.genres));
    active.seeking_talent = Set(input.seeking_talent);
    active.seeking_description = Set(input.seeking_description);
}
