//! Pack helpers. Contains [Builder], builder for [FsData].

use crate::{common::pack_path::PackPath, entry::Entry, fsdata::FsData};
use anyhow::{Error, bail, ensure};
use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

/// Main builder for the table. Inside it keeps [Entry]s ordered by their
/// [PackPath], together with the identifiers already taken.
///
/// Entries may be added in any order, the table is always emitted in pack path
/// order.
#[derive(Debug)]
pub struct Builder {
    entries_by_pack_path: BTreeMap<PackPath, (String, Entry)>,
    pack_paths_by_identifier: HashMap<String, PackPath>,
}
impl Builder {
    /// Creates empty [self] to be filled with entries.
    pub fn new() -> Self {
        Self {
            entries_by_pack_path: BTreeMap::new(),
            pack_paths_by_identifier: HashMap::new(),
        }
    }

    /// Adds entry to the table.
    ///
    /// Fails if entry with the same pack path was already added, or if its
    /// identifier is not usable in C or is already used by other entry (eg.
    /// `/a.b` and `/a_b`, or `/index.html.br` and `/index.html.gz`).
    pub fn entry_add(
        &mut self,
        entry: Entry,
    ) -> Result<(), Error> {
        let entry_vacant = match self.entries_by_pack_path.entry(entry.pack_path.clone()) {
            btree_map::Entry::Occupied(_entry) => {
                bail!("file {} already exist", entry.pack_path);
            }
            btree_map::Entry::Vacant(entry_vacant) => entry_vacant,
        };

        let identifier = entry.pack_path.identifier();
        ensure!(
            identifier_valid(&identifier),
            "file {} maps to identifier {:?} which is not valid in C",
            entry.pack_path,
            identifier
        );

        match self.pack_paths_by_identifier.entry(identifier.clone()) {
            hash_map::Entry::Occupied(occupied) => {
                bail!(
                    "files {} and {} both map to identifier {:?}",
                    occupied.get(),
                    entry.pack_path,
                    identifier
                );
            }
            hash_map::Entry::Vacant(vacant) => {
                vacant.insert(entry.pack_path.clone());
            }
        }

        entry_vacant.insert((identifier, entry));

        Ok(())
    }

    /// Adds collection of entries to the table.
    pub fn entries_add(
        &mut self,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<(), Error> {
        entries
            .into_iter()
            .try_for_each(|entry| self.entry_add(entry))?;

        Ok(())
    }

    /// Finalizes the builder, returning [FsData] with records in pack path
    /// order.
    pub fn finalize(self) -> FsData {
        FsData::from_entries(self.entries_by_pack_path.into_values())
    }
}

/// Identifier is appended to `data_` / `file_`, so it may start with a digit.
fn identifier_valid(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}
