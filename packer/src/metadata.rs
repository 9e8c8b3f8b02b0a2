//! Metadata helpers. Contains [resolve], inferring [Metadata] of a file from
//! its [PackPath] and applying per-path [Override]s.

use crate::common::{
    cache_control::CacheControl, content_encoding::ContentEncoding, metadata::Metadata,
    metadata::Override, pack_path::PackPath,
};
use std::collections::HashMap;

/// Lookup tables used by [resolve].
///
/// All tables are keyed by file name suffix without the dot (eg. `html`),
/// except for `overrides` which is keyed by exact pack path (eg.
/// `/index.html.gz`).
///
/// If not sure what to set here, use [Default].
#[derive(Clone, Debug)]
pub struct ResolveOptions {
    /// `content-type` by suffix.
    pub content_types: HashMap<String, String>,
    /// `content-type` for files with suffix missing in `content_types`.
    pub content_type_default: String,

    /// [CacheControl] by (last) suffix.
    pub cache_controls: HashMap<String, CacheControl>,
    /// [CacheControl] for files with suffix missing in `cache_controls`.
    pub cache_control_default: CacheControl,

    /// Settings forced for specific pack paths. Applied after inference.
    pub overrides: HashMap<String, Override>,
}
impl ResolveOptions {
    /// Returns [Override] registered for exactly this pack path.
    pub fn override_for(
        &self,
        pack_path: &PackPath,
    ) -> Option<&Override> {
        self.overrides.get(&**pack_path)
    }

    /// Whether file under `pack_path` is a complete http response on its own.
    pub fn headers_included(
        &self,
        pack_path: &PackPath,
    ) -> bool {
        self.override_for(pack_path)
            .is_some_and(|override_| override_.headers_included)
    }
}
impl Default for ResolveOptions {
    fn default() -> Self {
        let content_types = [
            ("css", "text/css"),
            ("html", "text/html"),
            ("json", "application/json"),
            ("js", "application/javascript"),
            ("txt", "text/plain"),
        ]
        .into_iter()
        .map(|(suffix, content_type)| (suffix.to_owned(), content_type.to_owned()))
        .collect();

        Self {
            content_types,
            content_type_default: "text/plain".to_owned(),
            cache_controls: HashMap::new(),
            cache_control_default: CacheControl::MAX_CACHE,
            overrides: overrides_default(),
        }
    }
}

/// Built-in override table.
///
/// Entry pages and captive portal probes must not be cached for a year, so
/// that clients pick up new firmware contents and keep detecting the portal.
/// `generate_204` probes are stored as complete responses.
///
/// Both `/index.html.br` and `/index.html.gz` are listed, but only one encoded
/// variant of a logical file can be packed: both map to the same identifier
/// and [crate::pack::Builder::entry_add] rejects the second one.
pub fn overrides_default() -> HashMap<String, Override> {
    let cache_control = |max_age| Override {
        cache_control: Some(CacheControl::from_max_age(max_age)),
        ..Override::default()
    };
    let headers_included = Override {
        headers_included: true,
        ..Override::default()
    };

    [
        ("/index.html.br", cache_control(300)),
        ("/index.html.gz", cache_control(300)),
        ("/hotspot-detect.html", cache_control(1)),
        ("/generate_204", headers_included.clone()),
        ("/gen_204", headers_included),
        ("/ios.html", cache_control(0)),
        ("/captive.html", cache_control(0)),
    ]
    .into_iter()
    .map(|(pack_path, override_)| (pack_path.to_owned(), override_))
    .collect()
}

/// Resolves [Metadata] of file served under `pack_path`.
///
/// `content-type` is looked up by the type suffix: second to last suffix for
/// encoded variants (`app.js.gz` -> `js`), last suffix otherwise.
/// `content-encoding` comes from the encoding suffix, `text` if there is none.
/// [CacheControl] is looked up by the last suffix. Finally [Override] for
/// exact `pack_path`, if any, is applied.
///
/// # Examples
///
/// ```
/// # use fsdata_pack_packer::{
/// #     common::{content_encoding::ContentEncoding, pack_path::PackPath},
/// #     metadata::{resolve, ResolveOptions},
/// # };
/// #
/// let metadata = resolve(
///     &PackPath::from_string("/app.js.gz".to_owned()),
///     &ResolveOptions::default(),
/// );
/// assert_eq!(metadata.content_type, "application/javascript");
/// assert_eq!(metadata.content_encoding, ContentEncoding::Gzip);
/// assert_eq!(metadata.cache_control.max_age, 31536000);
/// ```
pub fn resolve(
    pack_path: &PackPath,
    options: &ResolveOptions,
) -> Metadata {
    let metadata = infer(pack_path, options);

    match options.override_for(pack_path) {
        Some(override_) => {
            log::debug!("applying override for {pack_path}: {override_:?}");
            override_.apply(metadata)
        }
        None => metadata,
    }
}

/// Suffix determining `content-type` of file served under `pack_path`:
/// second to last suffix for encoded variants (`app.js.gz` -> `js`), last
/// suffix otherwise. [None] if file name has no such suffix.
pub fn type_suffix(pack_path: &PackPath) -> Option<&str> {
    let (stem, suffix) = pack_path.file_name().rsplit_once('.')?;

    if pack_path.content_encoding().is_some() {
        stem.rsplit_once('.').map(|(_, type_suffix)| type_suffix)
    } else {
        Some(suffix)
    }
}

/// Suffix-based part of [resolve].
fn infer(
    pack_path: &PackPath,
    options: &ResolveOptions,
) -> Metadata {
    let content_encoding = pack_path.content_encoding();

    // files without any dot have no suffix at all and get defaults
    let suffix = pack_path
        .file_name()
        .rsplit_once('.')
        .map(|(_, suffix)| suffix);

    let content_type = type_suffix(pack_path)
        .and_then(|type_suffix| options.content_types.get(type_suffix))
        .unwrap_or(&options.content_type_default)
        .clone();

    let cache_control = suffix
        .and_then(|suffix| options.cache_controls.get(suffix))
        .copied()
        .unwrap_or(options.cache_control_default);

    Metadata {
        content_type,
        content_encoding: content_encoding.unwrap_or(ContentEncoding::Text),
        cache_control,
    }
}
