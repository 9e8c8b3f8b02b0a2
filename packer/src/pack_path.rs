//! Pack path helpers. Contains [from_file_base_relative_path] that creates pack
//! paths from fs paths.

use crate::common::pack_path::PackPath;
use anyhow::{Context, Error, anyhow, ensure};
use std::{
    iter,
    path::{Component, Path},
};

/// Creates pack path (eg. "/dir1/dir2/file.html") from fs path relative to the
/// packed directory (eg. "dir1\\dir2\\file.html" on windows).
///
/// Components are always joined with `/`, so generated tables are identical
/// regardless of the host system. Path must consist of normal components only
/// and be valid utf-8.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use fsdata_pack_packer::{
/// #    common::pack_path::PackPath, pack_path::from_file_base_relative_path,
/// # };
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// assert_eq!(
///     from_file_base_relative_path(&PathBuf::from("css/style.css.gz"))?,
///     PackPath::from_string("/css/style.css.gz".to_owned()),
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn from_file_base_relative_path(file_base_relative_path: &Path) -> Result<PackPath, Error> {
    ensure!(
        file_base_relative_path.is_relative(),
        "path {} is not relative",
        file_base_relative_path.display()
    );

    let components = file_base_relative_path
        .components()
        .map(|component| match component {
            Component::Normal(component) => component
                .to_str()
                .ok_or_else(|| anyhow!("path component {component:?} is not valid utf-8")),
            // '.' or '..' or prefixes would make a path outside of packed directory
            component => Err(anyhow!("unsupported path component {component:?}")),
        })
        .collect::<Result<Vec<_>, Error>>()
        .with_context(|| file_base_relative_path.display().to_string())?;

    ensure!(!components.is_empty(), "empty relative path");

    // empty element at the beginning gives the leading /
    let pack_path = itertools::join(iter::once("").chain(components), "/");

    Ok(PackPath::from_string(pack_path))
}
