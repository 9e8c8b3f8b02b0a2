//! Entry helpers. Contains [Entry], the binary blob stored for a single file,
//! and [build_from_path] / [build_from_content] functions to create it from fs
//! / memory content.

use crate::{
    common::{SERVER_NAME_DEFAULT, pack_path::PackPath},
    compression::{self, Compression},
    header::{CRLF, Header, normalize_line_endings},
    metadata::{self, ResolveOptions},
    pack_path,
};
use anyhow::{Context, Error};
use std::{fs, path::Path};

/// Options when preparing entry in [build_from_content] and [build_from_path].
///
/// If not sure what to set here, use [Default].
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Tables used to resolve metadata.
    pub resolve: ResolveOptions,
    /// `Server` header value.
    pub server: String,
    /// Store plain, compressible files compressed. If set, file may still be
    /// stored plain (eg. when compressed version is larger than raw).
    pub compression: Option<Compression>,
}
impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            server: SERVER_NAME_DEFAULT.to_owned(),
            compression: None,
        }
    }
}

/// Single file ready to be placed in the table.
///
/// `data` consists of:
/// - logical name (pack path without encoding suffix), utf-8,
/// - NUL byte,
/// - http response header followed by blank line, or file own headers,
/// - file body.
///
/// Server compares requested path against the NUL terminated name and sends
/// everything after it as the response.
#[derive(PartialEq, Eq, Debug)]
pub struct Entry {
    /// The path this file was found under, including encoding suffix.
    pub pack_path: PackPath,
    /// Name, NUL, headers and body.
    pub data: Box<[u8]>,
}
impl Entry {
    /// Path requested by client.
    pub fn logical_name(&self) -> &str {
        self.pack_path.logical()
    }

    /// Length of name including its NUL terminator. This is the offset of
    /// the response inside `data`.
    pub fn name_length(&self) -> usize {
        self.logical_name().len() + 1
    }

    /// Complete http response (headers and body).
    pub fn response(&self) -> &[u8] {
        &self.data[self.name_length()..]
    }
}

/// Creates an [Entry] from file content.
///
/// Unless `pack_path` is marked as having headers included, metadata is
/// resolved and header generated with `Content-Length` of `content`. Otherwise
/// content line endings are normalized and it is stored without additional
/// header.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use fsdata_pack_packer::{
/// #     common::pack_path::PackPath,
/// #     entry::{build_from_content, BuildOptions},
/// # };
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let entry = build_from_content(
///     PackPath::from_string("/hello.txt.gz".to_owned()),
///     b"<gzip>",
///     &BuildOptions::default(),
/// )?;
/// assert_eq!(entry.logical_name(), "/hello.txt");
/// assert!(entry.data.starts_with(b"/hello.txt\0HTTP/1.0 200 OK\r\n"));
/// assert!(entry.data.ends_with(b"Content-Length: 6\r\nCache-Control: public, max-age=31536000\r\nServer: OpenAce\r\n\r\n<gzip>"));
/// #
/// # Ok(())
/// # }
/// ```
pub fn build_from_content(
    pack_path: PackPath,
    content: &[u8],
    options: &BuildOptions,
) -> Result<Entry, Error> {
    // compress if requested and worth it
    let compressed = match options.compression {
        Some(compression) if compressible(&pack_path, &options.resolve) => {
            compression::compress(&pack_path, content, compression)?
        }
        _ => None,
    };
    let (pack_path, content) = match &compressed {
        Some((pack_path, content)) => (pack_path.clone(), &**content),
        None => (pack_path, content),
    };

    let mut data = Vec::new();

    // name, NUL terminated
    data.extend_from_slice(pack_path.logical().as_bytes());
    data.push(0);

    if options.resolve.headers_included(&pack_path) {
        log::info!("{pack_path}: headers included, {} bytes", content.len());

        data.extend(normalize_line_endings(content).with_context(|| pack_path.to_string())?);
    } else {
        let metadata = metadata::resolve(&pack_path, &options.resolve);
        log::info!(
            "{pack_path}: content_type={}, content_encoding={}, cache_control={}, content.len={}",
            metadata.content_type,
            metadata.content_encoding,
            metadata.cache_control.max_age,
            content.len()
        );

        data.extend(Header::new(&metadata, content.len(), &options.server).to_bytes());
        data.extend_from_slice(CRLF.as_bytes());
        data.extend_from_slice(content);
    }

    Ok(Entry {
        pack_path,
        data: data.into_boxed_slice(),
    })
}

/// Creates an [Entry] by reading file from fs, specified by `path`.
///
/// Pack path is created from `path` relative to `base_directory_path`, with
/// [pack_path::from_file_base_relative_path]. Content is then passed to
/// [build_from_content].
pub fn build_from_path(
    path: &Path,
    base_directory_path: &Path,
    options: &BuildOptions,
) -> Result<Entry, Error> {
    // strip prefix, so path is relative to packed directory
    let file_base_relative_path = path
        .strip_prefix(base_directory_path)
        .context("resolve file_base_relative_path")?;

    let pack_path = pack_path::from_file_base_relative_path(file_base_relative_path)?;

    let content = fs::read(path).with_context(|| format!("read {}", path.display()))?;

    build_from_content(pack_path, &content, options)
}

/// Only plain files, with no forced settings, whose suffix is listed in the
/// content type table with a text-like type are compressed. Forced settings
/// are keyed by exact path and would not follow the renamed file. Unknown
/// suffixes (eg. `png`) fall back to the default type, which says nothing
/// about the content, so they are kept as they are.
fn compressible(
    pack_path: &PackPath,
    options: &ResolveOptions,
) -> bool {
    pack_path.content_encoding().is_none()
        && options.override_for(pack_path).is_none()
        && metadata::type_suffix(pack_path)
            .and_then(|type_suffix| options.content_types.get(type_suffix))
            .is_some_and(|content_type| compression::content_type_compressible(content_type))
}
