// Shared helpers for store integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use fyyur_db::input::{ArtistInput, ShowInput, VenueInput};
use fyyur_db::sea_orm::DatabaseConnection;
use fyyur_db::DatabaseConfig;
use fyyur_migration::{Migrator, MigratorTrait};
use uuid::Uuid;

/// Fresh in-memory SQLite database with every migration applied.
///
/// A single pooled connection keeps the in-memory database alive for the
/// whole test.
pub async fn test_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 8,
        idle_timeout_secs: 600,
    };
    let db = fyyur_db::connect(&config)
        .await
        .expect("failed to open sqlite database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn venue_input(name: &str) -> VenueInput {
    VenueInput {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        address: "123 Main St".into(),
        ..Default::default()
    }
}

pub fn artist_input(name: &str) -> ArtistInput {
    ArtistInput {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        phone: "326-123-5000".into(),
        ..Default::default()
    }
}

pub fn show_input(venue_id: Uuid, artist_id: Uuid, start: DateTime<Utc>) -> ShowInput {
    ShowInput {
        venue_id: Some(venue_id),
        artist_id: Some(artist_id),
        start_time: Some(start.fixed_offset()),
    }
}
