//! The descriptor list. Contains [FsData], an ordered collection of
//! [FsDataFile] records linked back to front, as consumed by the embedded
//! server.

use crate::entry::Entry;
use std::iter::FusedIterator;

/// Single descriptor record, `struct fsdata_file` in generated source.
#[derive(Debug)]
pub struct FsDataFile {
    /// Stem of generated identifiers, `data_<identifier>` and
    /// `file_<identifier>`.
    pub identifier: String,
    /// Index of previously emitted record, [None] for the first one.
    pub previous: Option<usize>,
    /// Data referenced by this record.
    pub entry: Entry,
}
impl FsDataFile {
    /// Offset of response inside data, right after the NUL terminated name.
    pub fn name_length(&self) -> usize {
        self.entry.name_length()
    }

    /// Length of response, that is data length without the name.
    pub fn response_length(&self) -> usize {
        self.entry.data.len() - self.name_length()
    }
}

/// Table of files, built once from sorted entries.
///
/// Records are stored in emission order. Each one points to its predecessor,
/// so the list is entered from the last record ([Self::root]) and walking it
/// visits records in reverse emission order, ending at the first one.
#[derive(Debug)]
pub struct FsData {
    files: Box<[FsDataFile]>,
}
impl FsData {
    /// Builds the table from `(identifier, entry)` pairs, in emission order.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Entry)>) -> Self {
        let files = entries
            .into_iter()
            .enumerate()
            .map(|(index, (identifier, entry))| FsDataFile {
                identifier,
                previous: index.checked_sub(1),
                entry,
            })
            .collect::<Box<[_]>>();

        Self { files }
    }

    /// Records in emission order.
    pub fn files(&self) -> &[FsDataFile] {
        &self.files
    }

    /// Number of records, `FS_NUMFILES`.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Index of list head, `FS_ROOT`. This is the last emitted record.
    pub fn root(&self) -> Option<usize> {
        self.files.len().checked_sub(1)
    }

    /// Iterates over records the way the server does, from [Self::root]
    /// following `previous`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            files: &self.files,
            next: self.root(),
        }
    }

    /// Finds record served for requested `name`, like server would: first
    /// match during [Self::walk].
    pub fn get_file_by_name(
        &self,
        name: &str,
    ) -> Option<&FsDataFile> {
        self.walk().find(|file| file.entry.logical_name() == name)
    }
}

/// Iterator returned by [FsData::walk].
#[derive(Debug)]
pub struct Walk<'a> {
    files: &'a [FsDataFile],
    next: Option<usize>,
}
impl<'a> Iterator for Walk<'a> {
    type Item = &'a FsDataFile;

    fn next(&mut self) -> Option<Self::Item> {
        let file = &self.files[self.next?];
        self.next = file.previous;
        Some(file)
    }
}
impl FusedIterator for Walk<'_> {}
