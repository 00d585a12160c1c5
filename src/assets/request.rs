//! Asset request validation
//!
//! Checks run on the raw string before anything touches the filesystem.
//! Normalizing first would let an encoded or collapsed `..` slip through.

use super::error::AssetError;

/// Validate a relative asset path.
///
/// Rejects any `..` (in any position), a leading separator, NUL bytes and
/// the empty path.
pub fn validate(path: &str) -> Result<(), AssetError> {
    if path.contains("..") {
        return Err(AssetError::Traversal(path.to_string()));
    }
    if path.starts_with(['/', '\\']) {
        return Err(AssetError::Absolute(path.to_string()));
    }
    if path.is_empty() || path.contains('\0') {
        return Err(AssetError::Malformed(path.to_string()));
    }
    Ok(())
}

/// Turn the percent-encoded remainder of a request URI into an asset path.
///
/// The raw form is validated first, then decoded and validated again so
/// `%2e%2e` and `%2f` cannot reintroduce what the first pass refused.
pub fn decode_uri_path(raw: &str) -> Result<String, AssetError> {
    validate(raw)?;
    let decoded = urlencoding::decode(raw)
        .map_err(|_| AssetError::Malformed(raw.to_string()))?
        .into_owned();
    validate(&decoded)?;
    Ok(decoded)
}
