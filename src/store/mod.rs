//! In-memory content store
//!
//! Holds the studio's records behind one async lock. Ids are assigned per
//! record kind, starting at 1. Saving a photo or personality runs the
//! orientation classifier on the uploaded image.

mod error;
mod validate;

pub use error::StoreError;

use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::media;
use crate::models::{
    Booking, BookingStatus, Category, CreateBooking, CreateCategory, CreatePackage,
    CreatePersonalityImage, DbId, Package, Personality, PersonalityDraft, PersonalityImage, Photo,
    PhotoDraft, Timestamp, DEFAULT_PERSONALITY_TITLE,
};

struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn allocate_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: DbId) -> Option<&T> {
        self.rows.get(&id)
    }

    fn contains(&self, id: DbId) -> bool {
        self.rows.contains_key(&id)
    }

    fn put(&mut self, id: DbId, row: T) -> T {
        self.rows.insert(id, row.clone());
        row
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.rows.values().find(|row| pred(row))
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

#[derive(Default)]
struct Tables {
    categories: Table<Category>,
    photos: Table<Photo>,
    packages: Table<Package>,
    personalities: Table<Personality>,
    personality_images: Table<PersonalityImage>,
    bookings: Table<Booking>,
}

/// Newest first, ties broken by the later id
fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (Timestamp, DbId)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[derive(Default)]
pub struct ContentStore {
    tables: RwLock<Tables>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- categories ---------------------------------------------------------

    pub async fn create_category(&self, input: CreateCategory) -> Result<Category, StoreError> {
        validate::required("name", &input.name, 100)?;
        validate::slug(&input.slug)?;

        let mut tables = self.tables.write().await;
        if tables.categories.find(|c| c.slug == input.slug).is_some() {
            return Err(StoreError::DuplicateSlug {
                entity: "category",
                slug: input.slug,
            });
        }

        let id = tables.categories.allocate_id();
        tracing::debug!(id, slug = %input.slug, "Category created");
        Ok(tables.categories.put(
            id,
            Category {
                id,
                name: input.name,
                slug: input.slug,
                description: input.description,
            },
        ))
    }

    pub async fn category(&self, id: DbId) -> Result<Category, StoreError> {
        let tables = self.tables.read().await;
        tables
            .categories
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("category", id))
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Category, StoreError> {
        let tables = self.tables.read().await;
        tables
            .categories
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or_else(|| StoreError::not_found("category", slug))
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.tables.read().await.categories.all()
    }

    // -- photos -------------------------------------------------------------

    /// Create or update a photo.
    ///
    /// `image` is the uploaded file's content; it is only decoded when the
    /// orientation needs classifying. Decode failures abort the save.
    pub async fn save_photo(&self, draft: PhotoDraft, image: &[u8]) -> Result<Photo, StoreError> {
        validate::required("title", &draft.title, 200)?;
        validate::required("image", &draft.image, 255)?;
        let orientation = media::classify_on_save(draft.orientation, draft.id.is_none(), image)?;

        let mut tables = self.tables.write().await;
        if !tables.categories.contains(draft.category_id) {
            return Err(StoreError::not_found("category", draft.category_id));
        }

        let (id, date_added) = match draft.id {
            Some(id) => {
                let existing = tables
                    .photos
                    .get(id)
                    .ok_or_else(|| StoreError::not_found("photo", id))?;
                (id, existing.date_added)
            }
            None => (tables.photos.allocate_id(), Utc::now()),
        };

        tracing::debug!(id, %orientation, "Photo saved");
        Ok(tables.photos.put(
            id,
            Photo {
                id,
                title: draft.title,
                category_id: draft.category_id,
                image: draft.image,
                description: draft.description,
                featured: draft.featured,
                date_added,
                orientation,
            },
        ))
    }

    pub async fn photo(&self, id: DbId) -> Result<Photo, StoreError> {
        let tables = self.tables.read().await;
        tables
            .photos
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("photo", id))
    }

    /// Photos newest first, optionally limited to one category by slug
    pub async fn photos(&self, category_slug: Option<&str>) -> Result<Vec<Photo>, StoreError> {
        let tables = self.tables.read().await;
        let mut photos = match category_slug {
            Some(slug) => {
                let category = tables
                    .categories
                    .find(|c| c.slug == slug)
                    .ok_or_else(|| StoreError::not_found("category", slug))?;
                tables
                    .photos
                    .rows
                    .values()
                    .filter(|p| p.category_id == category.id)
                    .cloned()
                    .collect()
            }
            None => tables.photos.all(),
        };
        newest_first(&mut photos, |p| (p.date_added, p.id));
        Ok(photos)
    }

    // -- packages -----------------------------------------------------------

    pub async fn create_package(&self, input: CreatePackage) -> Result<Package, StoreError> {
        validate::required("name", &input.name, 100)?;

        let mut tables = self.tables.write().await;
        let id = tables.packages.allocate_id();
        Ok(tables.packages.put(
            id,
            Package {
                id,
                name: input.name,
                description: input.description,
                features: input.features,
            },
        ))
    }

    pub async fn package(&self, id: DbId) -> Result<Package, StoreError> {
        let tables = self.tables.read().await;
        tables
            .packages
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("package", id))
    }

    pub async fn packages(&self) -> Vec<Package> {
        self.tables.read().await.packages.all()
    }

    // -- personalities ------------------------------------------------------

    /// Create or update a personality; orientation rules match [`Self::save_photo`].
    pub async fn save_personality(
        &self,
        draft: PersonalityDraft,
        image: &[u8],
    ) -> Result<Personality, StoreError> {
        validate::required("name", &draft.name, 100)?;
        validate::slug(&draft.slug)?;
        let title = draft
            .title
            .unwrap_or_else(|| DEFAULT_PERSONALITY_TITLE.to_string());
        validate::required("title", &title, 100)?;
        validate::required("featured_image", &draft.featured_image, 255)?;
        let orientation = media::classify_on_save(draft.orientation, draft.id.is_none(), image)?;

        let mut tables = self.tables.write().await;
        let slug_taken = tables
            .personalities
            .find(|p| p.slug == draft.slug && Some(p.id) != draft.id)
            .is_some();
        if slug_taken {
            return Err(StoreError::DuplicateSlug {
                entity: "personality",
                slug: draft.slug,
            });
        }

        let (id, date_added) = match draft.id {
            Some(id) => {
                let existing = tables
                    .personalities
                    .get(id)
                    .ok_or_else(|| StoreError::not_found("personality", id))?;
                (id, existing.date_added)
            }
            None => (tables.personalities.allocate_id(), Utc::now()),
        };

        tracing::debug!(id, slug = %draft.slug, %orientation, "Personality saved");
        Ok(tables.personalities.put(
            id,
            Personality {
                id,
                name: draft.name,
                slug: draft.slug,
                title,
                short_description: draft.short_description,
                full_description: draft.full_description,
                featured_image: draft.featured_image,
                date_added,
                orientation,
            },
        ))
    }

    pub async fn personality_by_slug(&self, slug: &str) -> Result<Personality, StoreError> {
        let tables = self.tables.read().await;
        tables
            .personalities
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| StoreError::not_found("personality", slug))
    }

    /// All personalities, newest first
    pub async fn personalities(&self) -> Vec<Personality> {
        let mut all = self.tables.read().await.personalities.all();
        newest_first(&mut all, |p| (p.date_added, p.id));
        all
    }

    pub async fn add_personality_image(
        &self,
        input: CreatePersonalityImage,
    ) -> Result<PersonalityImage, StoreError> {
        validate::required("image", &input.image, 255)?;
        validate::max_len("caption", &input.caption, 200)?;

        let mut tables = self.tables.write().await;
        if !tables.personalities.contains(input.personality_id) {
            return Err(StoreError::not_found("personality", input.personality_id));
        }

        let id = tables.personality_images.allocate_id();
        Ok(tables.personality_images.put(
            id,
            PersonalityImage {
                id,
                personality_id: input.personality_id,
                image: input.image,
                caption: input.caption,
            },
        ))
    }

    pub async fn personality_images(
        &self,
        personality_id: DbId,
    ) -> Result<Vec<PersonalityImage>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.personalities.contains(personality_id) {
            return Err(StoreError::not_found("personality", personality_id));
        }
        Ok(tables
            .personality_images
            .rows
            .values()
            .filter(|img| img.personality_id == personality_id)
            .cloned()
            .collect())
    }

    // -- bookings -----------------------------------------------------------

    /// Record a booking request. The package must exist.
    pub async fn create_booking(&self, input: CreateBooking) -> Result<Booking, StoreError> {
        validate::required("name", &input.name, 100)?;
        validate::email(&input.email)?;
        validate::required("phone", &input.phone, 20)?;

        let mut tables = self.tables.write().await;
        if !tables.packages.contains(input.package_id) {
            return Err(StoreError::not_found("package", input.package_id));
        }

        let id = tables.bookings.allocate_id();
        tracing::info!(id, date = %input.date, package_id = input.package_id, "Booking received");
        Ok(tables.bookings.put(
            id,
            Booking {
                id,
                name: input.name,
                email: input.email,
                phone: input.phone,
                date: input.date,
                time: input.time,
                package_id: Some(input.package_id),
                message: input.message,
                status: BookingStatus::Pending,
                created_at: Utc::now(),
            },
        ))
    }

    pub async fn booking(&self, id: DbId) -> Result<Booking, StoreError> {
        let tables = self.tables.read().await;
        tables
            .bookings
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("booking", id))
    }

    /// All bookings, newest first
    pub async fn bookings(&self) -> Vec<Booking> {
        let mut all = self.tables.read().await.bookings.all();
        newest_first(&mut all, |b| (b.created_at, b.id));
        all
    }

    pub async fn update_booking_status(
        &self,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        let mut tables = self.tables.write().await;
        let mut booking = tables
            .bookings
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("booking", id))?;
        booking.status = status;
        tracing::info!(id, ?status, "Booking status updated");
        Ok(tables.bookings.put(id, booking))
    }
}
