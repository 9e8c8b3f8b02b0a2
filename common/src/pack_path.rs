//! Pack path contains custom type for representing the path a file is served
//! under.

use crate::content_encoding::ContentEncoding;
use std::{borrow::Borrow, fmt, ops::Deref};

/// [PackPath] represents path inside a `pack`, eg. `/index.html.gz`. It
/// corresponds to the file path relative to the packed directory, with
/// components joined by `/` and a leading `/`.
///
/// Pack path may carry an encoding suffix (`.br`, `.gz`), in which case the
/// file is served as that encoding under its [logical](Self::logical) name,
/// eg. `/index.html`.
///
/// Ordering is byte-wise on the string. Packing order relies on this.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PackPath {
    inner: String,
}
impl PackPath {
    /// Construct path from string representation. Refer to [self] for details.
    /// Providing invalid path won't result in catastrophic failure, but
    /// such path will never be requested by a client.
    pub fn from_string(inner: String) -> Self {
        Self { inner }
    }

    /// Last component of the path, eg. `app.js.gz` for `/assets/app.js.gz`.
    pub fn file_name(&self) -> &str {
        match self.inner.rsplit_once('/') {
            Some((_, file_name)) => file_name,
            None => &self.inner,
        }
    }

    /// Encoding announced by the file name suffix, if any.
    ///
    /// Only the last dot separated segment is considered and the file name
    /// must not consist of the suffix alone (`/.gz` is not encoded).
    pub fn content_encoding(&self) -> Option<ContentEncoding> {
        let (stem, suffix) = self.file_name().rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        ContentEncoding::from_suffix(suffix)
    }

    /// Path requested by the client, that is [self] with encoding suffix
    /// removed. For `/app.js.gz` this is `/app.js`, for `/app.js` this is
    /// unchanged.
    pub fn logical(&self) -> &str {
        match self.content_encoding().and_then(|encoding| encoding.suffix()) {
            // suffix + dot
            Some(suffix) => &self.inner[..self.inner.len() - suffix.len() - 1],
            None => &self.inner,
        }
    }

    /// Stem of the C identifiers generated for this file. Built from the
    /// [logical](Self::logical) path by replacing `.`, `-`, ` ` and `/` with
    /// `_` and removing the leading `/`, eg. `/css/main-v2.css` becomes
    /// `css_main_v2_css`.
    ///
    /// This mapping is not injective (`/a.b` and `/a_b` share identifier),
    /// callers must detect collisions.
    pub fn identifier(&self) -> String {
        let logical = self.logical();
        let logical = logical.strip_prefix('/').unwrap_or(logical);

        logical
            .chars()
            .map(|character| match character {
                '.' | '-' | ' ' | '/' => '_',
                character => character,
            })
            .collect()
    }
}

// to allow searching in maps directly by http path (which is str)
impl Deref for PackPath {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl Borrow<str> for PackPath {
    fn borrow(&self) -> &str {
        self.inner.as_str()
    }
}
impl fmt::Display for PackPath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.inner)
    }
}
