pub mod artist;
pub mod show;
pub mod venue;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Genre tags attached to a venue or an artist, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Genres(pub Vec<String>);
