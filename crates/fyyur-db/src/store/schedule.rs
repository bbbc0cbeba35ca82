//! Past and upcoming shows of a venue or an artist.
//!
//! A show is past when it starts strictly before `now` and upcoming when it
//! starts strictly after. A show starting exactly at `now` is in neither set.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::cmp::Ordering;
use uuid::Uuid;

use crate::entities::show;
use crate::error::StoreError;

/// Whose shows a schedule query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOwner {
    Venue(Uuid),
    Artist(Uuid),
}

impl ShowOwner {
    fn condition(self) -> SimpleExpr {
        match self {
            ShowOwner::Venue(id) => show::Column::VenueId.eq(id),
            ShowOwner::Artist(id) => show::Column::ArtistId.eq(id),
        }
    }
}

/// Position of a show's start relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowTiming {
    Past,
    Upcoming,
    Now,
}

impl ShowTiming {
    pub fn classify(show: &show::Model, now: DateTime<Utc>) -> Self {
        match show.start_time.with_timezone(&Utc).cmp(&now) {
            Ordering::Less => ShowTiming::Past,
            Ordering::Greater => ShowTiming::Upcoming,
            Ordering::Equal => ShowTiming::Now,
        }
    }
}

/// Both halves of an owner's schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub past: Vec<show::Model>,
    pub upcoming: Vec<show::Model>,
}

pub async fn past_shows<C: ConnectionTrait>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<Vec<show::Model>, StoreError> {
    Ok(show::Entity::find()
        .filter(owner.condition())
        .filter(show::Column::StartTime.lt(now.fixed_offset()))
        .order_by_desc(show::Column::StartTime)
        .all(db)
        .await?)
}

pub async fn upcoming_shows<C: ConnectionTrait>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<Vec<show::Model>, StoreError> {
    Ok(show::Entity::find()
        .filter(owner.condition())
        .filter(show::Column::StartTime.gt(now.fixed_offset()))
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await?)
}

pub async fn past_shows_count<C: ConnectionTrait>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<u64, StoreError> {
    Ok(show::Entity::find()
        .filter(owner.condition())
        .filter(show::Column::StartTime.lt(now.fixed_offset()))
        .count(db)
        .await?)
}

pub async fn upcoming_shows_count<C: ConnectionTrait>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<u64, StoreError> {
    Ok(show::Entity::find()
        .filter(owner.condition())
        .filter(show::Column::StartTime.gt(now.fixed_offset()))
        .count(db)
        .await?)
}

pub async fn schedule<C: ConnectionTrait>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<Schedule, StoreError> {
    Ok(Schedule {
        past: past_shows(db, owner, now).await?,
        upcoming: upcoming_shows(db, owner, now).await?,
    })
}
