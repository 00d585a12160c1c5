//! HTTP cache control module

/// `Cache-Control` policy attached to every served asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Seconds a shared cache may keep the response
    pub max_age: u32,
}

impl CachePolicy {
    pub const ONE_YEAR: Self = Self::public(31_536_000);

    pub const fn public(max_age: u32) -> Self {
        Self { max_age }
    }

    /// Convert to Cache-Control header value
    pub fn header_value(self) -> String {
        format!("public, max-age={}", self.max_age)
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::ONE_YEAR
    }
}
