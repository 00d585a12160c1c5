//! Portrait/landscape tagging from pixel dimensions

use image::ImageReader;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Cursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Taller than wide is portrait; everything else, squares included, is landscape
    pub const fn from_dimensions(width: u32, height: u32) -> Self {
        if height > width {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrientationError {
    #[error("failed to read image: {0}")]
    Io(#[from] io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Read the image header from `bytes` and classify it.
///
/// Only the dimensions are decoded, not the pixel data.
pub fn detect_orientation(bytes: &[u8]) -> Result<Orientation, OrientationError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(Orientation::from_dimensions(width, height))
}

/// Orientation to store when a record is saved.
///
/// New records and records without a tag are classified from `image`;
/// an existing tag on an existing record is kept as is.
pub fn classify_on_save(
    current: Option<Orientation>,
    is_new: bool,
    image: &[u8],
) -> Result<Orientation, OrientationError> {
    match current {
        Some(orientation) if !is_new => Ok(orientation),
        _ => detect_orientation(image),
    }
}
