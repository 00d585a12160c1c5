//! MIME type detection module
//!
//! Returns the Content-Type for a file based on its extension.

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Get the Content-Type for `path` from the standard extension table
///
/// # Examples
/// ```
/// use std::path::Path;
/// use studio_assets::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("css/site.css")), "text/css");
/// assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path).first_raw().unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type_for(Path::new("a/site.css")), "text/css");
        assert_eq!(content_type_for(Path::new("photos/x.png")), "image/png");
        assert_eq!(content_type_for(Path::new("photos/x.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("photos/x.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("img/logo.svg")), "image/svg+xml");
        assert_eq!(content_type_for(Path::new("img/hero.webp")), "image/webp");
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(content_type_for(Path::new("IMG_0001.JPG")), "image/jpeg");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type_for(Path::new("blob.nosuchext")), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("LICENSE")), OCTET_STREAM);
    }
}
