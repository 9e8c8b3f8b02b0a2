//! Cache control types used by file metadata.

use serde::Deserialize;
use std::fmt;

/// Cache policy of a file, expressed as `max-age` seconds. This will
/// correspond to `Cache-Control: public, max-age=<seconds>` header set in the
/// canned response.
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(transparent)]
pub struct CacheControl {
    /// Number of seconds the client may cache the response for.
    pub max_age: u32,
}
impl CacheControl {
    /// One year, the "cache forever" value used for static assets.
    pub const MAX_CACHE: Self = Self::from_max_age(31_536_000);
    /// Zero seconds, forces clients to revalidate on every request.
    pub const NO_CACHE: Self = Self::from_max_age(0);

    /// Creates [self] from `max-age` seconds.
    pub const fn from_max_age(max_age: u32) -> Self {
        Self { max_age }
    }
}
impl Default for CacheControl {
    fn default() -> Self {
        Self::MAX_CACHE
    }
}
impl fmt::Display for CacheControl {
    /// Formats as `Cache-Control` header value.
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "public, max-age={}", self.max_age)
    }
}
