//! Uploaded image inspection

mod orientation;

pub use orientation::{classify_on_save, detect_orientation, Orientation, OrientationError};
