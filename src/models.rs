//! Content store records and DTOs.
//!
//! Six record kinds back the public pages:
//! - `Category` / `Photo` -- the portfolio
//! - `Package` -- bookable photography packages
//! - `Personality` / `PersonalityImage` -- photographer showcase
//! - `Booking` -- requests submitted through the booking form

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::Orientation;

pub type DbId = i64;
pub type Timestamp = DateTime<Utc>;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Photo
// ---------------------------------------------------------------------------

/// A portfolio photo. `image` is the stored file path under `photos/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub title: String,
    pub category_id: DbId,
    pub image: String,
    pub description: String,
    pub featured: bool,
    pub date_added: Timestamp,
    pub orientation: Orientation,
}

/// Photo as submitted for saving.
///
/// `id: None` saves a new photo. Leaving `orientation` unset, or saving a
/// new photo, classifies the image.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoDraft {
    #[serde(default)]
    pub id: Option<DbId>,
    pub title: String,
    pub category_id: DbId,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

impl From<Photo> for PhotoDraft {
    fn from(photo: Photo) -> Self {
        Self {
            id: Some(photo.id),
            title: photo.title,
            category_id: photo.category_id,
            image: photo.image,
            description: photo.description,
            featured: photo.featured,
            orientation: Some(photo.orientation),
        }
    }
}

// ---------------------------------------------------------------------------
// Package
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// One feature per line
    pub features: String,
}

impl Package {
    pub fn feature_list(&self) -> Vec<&str> {
        self.features.lines().collect()
    }
}

/// DTO for creating a new package.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackage {
    pub name: String,
    pub description: String,
    pub features: String,
}

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

pub const DEFAULT_PERSONALITY_TITLE: &str = "Photographer";

/// A photographer on the showcase pages. `featured_image` lives under
/// `personalities/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personality {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    pub featured_image: String,
    pub date_added: Timestamp,
    pub orientation: Orientation,
}

/// Personality as submitted for saving; same save rules as [`PhotoDraft`].
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalityDraft {
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    pub short_description: String,
    pub full_description: String,
    pub featured_image: String,
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

impl From<Personality> for PersonalityDraft {
    fn from(p: Personality) -> Self {
        Self {
            id: Some(p.id),
            name: p.name,
            slug: p.slug,
            title: Some(p.title),
            short_description: p.short_description,
            full_description: p.full_description,
            featured_image: p.featured_image,
            orientation: Some(p.orientation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityImage {
    pub id: DbId,
    pub personality_id: DbId,
    pub image: String,
    pub caption: String,
}

/// DTO for attaching an image to a personality.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersonalityImage {
    pub personality_id: DbId,
    pub image: String,
    #[serde(default)]
    pub caption: String,
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Cleared if the package is removed
    pub package_id: Option<DbId>,
    pub message: String,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

/// DTO for a booking form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub package_id: DbId,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_list_splits_lines() {
        let package = Package {
            id: 1,
            name: "Wedding".into(),
            description: "Full day".into(),
            features: "8 hours coverage\r\nTwo photographers\nOnline gallery".into(),
        };
        assert_eq!(
            package.feature_list(),
            vec!["8 hours coverage", "Two photographers", "Online gallery"]
        );
    }

    #[test]
    fn test_booking_status_default_and_names() {
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_booking_form_deserializes() {
        let form: CreateBooking = serde_json::from_str(
            r#"{"name":"Ana","email":"ana@example.com","phone":"555-0100",
                "date":"2026-11-02","time":"14:30:00","package_id":3}"#,
        )
        .unwrap();
        assert_eq!(form.package_id, 3);
        assert!(form.message.is_empty());
        assert_eq!(form.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
    }
}
