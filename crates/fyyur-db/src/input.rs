//! Typed request payloads for store writes.
//!
//! Every payload is checked with `validated()` before any database call.
//! Validation trims text, turns blank optional fields into `None` and reports
//! all rejected fields at once.

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::error::{FieldError, StoreError};

/// Digits with optional leading `+` and common separators, 7-20 chars.
const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 ().\-]{5,18}[0-9]$";

static PHONE_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(PHONE_PATTERN));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VenueInput {
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
}

impl Default for VenueInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            city: String::new(),
            state: String::new(),
            address: String::new(),
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            genres: Vec::new(),
            seeking_talent: true,
            seeking_description: None,
        }
    }
}

impl VenueInput {
    pub fn validated(self) -> Result<Self, StoreError> {
        let mut errors = Vec::new();

        let name = required("name", &self.name, &mut errors);
        let city = required("city", &self.city, &mut errors);
        let state = required("state", &self.state, &mut errors);
        let address = required("address", &self.address, &mut errors);

        let phone = optional(self.phone);
        if let Some(phone) = &phone {
            check_phone("phone", phone, &mut errors);
        }
        let image_link = link("image_link", self.image_link, &mut errors);
        let facebook_link = link("facebook_link", self.facebook_link, &mut errors);
        let website = link("website", self.website, &mut errors);

        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        Ok(Self {
            name,
            city,
            state,
            address,
            phone,
            image_link,
            facebook_link,
            website,
            genres: clean_genres(self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtistInput {
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
}

impl Default for ArtistInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            city: String::new(),
            state: String::new(),
            phone: String::new(),
            genres: Vec::new(),
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_venue: true,
            seeking_description: None,
        }
    }
}

impl ArtistInput {
    pub fn validated(self) -> Result<Self, StoreError> {
        let mut errors = Vec::new();

        let name = required("name", &self.name, &mut errors);
        let city = required("city", &self.city, &mut errors);
        let state = required("state", &self.state, &mut errors);
        let phone = required("phone", &self.phone, &mut errors);
        if !phone.is_empty() {
            check_phone("phone", &phone, &mut errors);
        }
        let image_link = link("image_link", self.image_link, &mut errors);
        let facebook_link = link("facebook_link", self.facebook_link, &mut errors);
        let website = link("website", self.website, &mut errors);

        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        Ok(Self {
            name,
            city,
            state,
            phone,
            genres: clean_genres(self.genres),
            image_link,
            facebook_link,
            website,
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description),
        })
    }
}

/// Booking request. Fields are optional so that a missing one is reported
/// as a validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShowInput {
    pub venue_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub start_time: Option<DateTime<FixedOffset>>,
}

/// A show that passed validation; `start_time` is normalised to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: Uuid,
    pub artist_id: Uuid,
    pub start_time: DateTime<Utc>,
}

impl ShowInput {
    pub fn validated(&self) -> Result<NewShow, StoreError> {
        let mut errors = Vec::new();
        if self.venue_id.is_none() {
            errors.push(FieldError::new("venue_id", "is required"));
        }
        if self.artist_id.is_none() {
            errors.push(FieldError::new("artist_id", "is required"));
        }
        if self.start_time.is_none() {
            errors.push(FieldError::new("start_time", "is required"));
        }

        match (self.venue_id, self.artist_id, self.start_time) {
            (Some(venue_id), Some(artist_id), Some(start_time)) if errors.is_empty() => {
                Ok(NewShow {
                    venue_id,
                    artist_id,
                    start_time: start_time.with_timezone(&Utc),
                })
            }
            _ => Err(StoreError::Validation(errors)),
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────

fn required(field: &'static str, value: &str, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
    trimmed.to_string()
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn link(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = optional(value)?;
    match url::Url::parse(&value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => errors.push(FieldError::new(
            field,
            format!("must be an http(s) URL, got scheme '{}'", parsed.scheme()),
        )),
        Err(_) => errors.push(FieldError::new(field, "must be a valid URL")),
    }
    Some(value)
}

fn check_phone(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    match PHONE_RE.as_ref() {
        Ok(re) if re.is_match(value) => {}
        Ok(_) => errors.push(FieldError::new(field, "must be a phone number")),
        Err(e) => {
            tracing::error!(error = %e, "invalid phone regex");
            errors.push(FieldError::new(field, "could not be checked"));
        }
    }
}

/// Trim tags, drop blanks and repeated tags, keep first-seen order.
fn clean_genres(genres: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        let genre = genre.trim();
        if !genre.is_empty() && !cleaned.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
            cleaned.push(genre.to_string());
        }
    }
    cleaned
}
