use crate::media::OrientationError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} with slug '{slug}' already exists")]
    DuplicateSlug { entity: &'static str, slug: String },

    #[error(transparent)]
    Image(#[from] OrientationError),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
