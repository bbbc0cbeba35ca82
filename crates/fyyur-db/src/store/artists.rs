use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{name_contains, SearchResults};
use crate::entities::{artist, show, Genres};
use crate::error::StoreError;
use crate::input::ArtistInput;

const ENTITY: &str = "artist";

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<artist::Model, StoreError> {
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound { entity: ENTITY, id })
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<artist::Model>, StoreError> {
    Ok(artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?)
}

/// Case-insensitive substring search on the artist name.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<SearchResults<artist::Model>, StoreError> {
    let artists = artist::Entity::find()
        .filter(name_contains(artist::Column::Name, term))
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?;
    Ok(SearchResults::new(artists))
}

pub async fn create(
    db: &DatabaseConnection,
    input: ArtistInput,
) -> Result<artist::Model, StoreError> {
    let input = input.validated()?;
    let name = input.name.clone();

    let txn = db.begin().await?;
    ensure_name_free(&txn, &name, None).await?;

    let mut active = artist::ActiveModel {
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

    tracing::info!(artist_id = %created.id, name = %created.name, "artist created");
    Ok(created)
}

/// Replace every editable field of an artist.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    input: ArtistInput,
) -> Result<artist::Model, StoreError> {
    let input = input.validated()?;
    let name = input.name.clone();

    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;
    ensure_name_free(&txn, &name, Some(id)).await?;

    let mut active: artist::ActiveModel = existing.into();
    apply(&mut active, input);

    let updated = active
        .update(&txn)
        .await
        .map_err(|e| StoreError::from_write(e, ENTITY, &name))?;
    txn.commit().await?;

    tracing::info!(artist_id = %updated.id, "artist updated");
    Ok(updated)
}

/// Delete an artist together with its shows.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<artist::Model, StoreError> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;

    let removed = show::Entity::delete_many()
        .filter(show::Column::ArtistId.eq(id))
        .exec(&txn)
        .await?;
    artist::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        artist_id = %id,
        shows_removed = removed.rows_affected,
        "artist deleted"
    );
    Ok(existing)
}

async fn ensure_name_free<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except: Option<Uuid>,
) -> Result<(), StoreError> {
    let mut query = artist::Entity::find().filter(artist::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(artist::Column::Id.ne(id));
    }
    match query.one(db).await? {
        Some(_) => Err(StoreError::DuplicateName {
            entity: ENTITY,
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

fn apply(active: &mut artist::ActiveModel, input: ArtistInput) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.phone = Set(input.phone);
    active.genres = Set(Genres(input.genres));
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website = Set(input.website);
    active.seeking_venue = Set(input.seeking_venue);
    active.seeking_description = Set(input.seeking_description);
}
