//! Directory helpers. Contains [search] function, used to gather files from
//! directory recursively.

use crate::entry::{self, BuildOptions, Entry};
use anyhow::{Context, Error, ensure};
use std::path::Path;
use walkdir::WalkDir;

/// Settings for [search] function.
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct SearchOptions {
    /// Whether to follow links while traversing directories.
    pub follow_links: bool,
}
impl Default for SearchOptions {
    fn default() -> Self {
        Self { follow_links: true }
    }
}

/// Searches fs recursively and builds [Entry] for each file.
///
/// Traverses directory specified in `path` using [SearchOptions]. Builds all
/// found files as [Entry] using [BuildOptions]. Pack paths are created by
/// stripping `path` from full file path.
///
/// Returned entries are sorted by pack path, so the result does not depend on
/// the order the filesystem lists directories in. Any error (unreadable
/// directory or file) aborts the search.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use fsdata_pack_packer::{
/// #     directory::{search, SearchOptions},
/// #     entry::BuildOptions,
/// # };
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// // traverse directory from tests
/// let entries = search(
///     &PathBuf::from(env!("CARGO_MANIFEST_DIR"))
///         .parent()
///         .unwrap()
///         .join("tests")
///         .join("data")
///         .join("captive-portal"),
///     &SearchOptions::default(),
///     &BuildOptions::default(),
/// )?;
///
/// let pack_paths = entries
///     .iter()
///     .map(|entry| &*entry.pack_path)
///     .collect::<Vec<_>>();
///
/// // sorted, nested directories included
/// assert!(pack_paths.is_sorted());
/// assert!(pack_paths.contains(&"/css/style.css"));
/// assert!(pack_paths.contains(&"/generate_204"));
/// #
/// # Ok(())
/// # }
/// ```
pub fn search(
    path: &Path,
    options: &SearchOptions,
    build_options: &BuildOptions,
) -> Result<Box<[Entry]>, Error> {
    ensure!(path.is_dir(), "{} is not a directory", path.display());

    let mut entries = WalkDir::new(path)
        .follow_links(options.follow_links)
        .into_iter()
        .map(|dir_entry| {
            // detect search errors
            let dir_entry = dir_entry?;

            // we are interested in files only
            // if follow_links is true, this will be resolved as link target
            if !dir_entry.file_type().is_file() {
                return Ok(None);
            }

            let entry = entry::build_from_path(dir_entry.path(), path, build_options)
                .with_context(|| dir_entry.path().display().to_string())?;

            Ok(Some(entry))
        })
        .filter_map(|entry_result| entry_result.transpose()) // strips Ok(None)
        .collect::<Result<Vec<_>, Error>>()?;

    // walk order depends on directory listing, pack path order does not
    entries.sort_by(|a, b| a.pack_path.cmp(&b.pack_path));

    log::debug!("found {} files in {}", entries.len(), path.display());

    Ok(entries.into_boxed_slice())
}
