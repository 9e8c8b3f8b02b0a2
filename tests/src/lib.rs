#![doc(hidden)]

use anyhow::{Context, Error, anyhow, ensure};
use fsdata_pack_packer::{
    directory::{SearchOptions, search},
    entry::BuildOptions,
    fsdata::FsData,
    pack::Builder,
};
use simple_logger::SimpleLogger;
use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{LazyLock, Once},
};

// data directory of this crate
pub fn data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

// logs from packer are useful when a test fails
pub fn logger_init() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        SimpleLogger::new().env().init().unwrap();
    });
}

// builds [FsData] from data/captive-portal
pub fn build_captive_portal(build_options: &BuildOptions) -> Result<FsData, Error> {
    logger_init();

    let mut pack = Builder::new();
    pack.entries_add(search(
        &data_path().join("captive-portal"),
        &SearchOptions::default(),
        build_options,
    )?)?;
    let fsdata = pack.finalize();

    Ok(fsdata)
}
pub fn build_captive_portal_cached() -> &'static FsData {
    static CACHE: LazyLock<FsData> =
        LazyLock::new(|| build_captive_portal(&BuildOptions::default()).unwrap());

    &CACHE
}

// prebuilt data/captive-portal.fsdata.c
pub fn captive_portal_source_prebuilt() -> Result<Vec<u8>, Error> {
    let path = data_path().join("captive-portal.fsdata.c");
    let source = fs::read(&path)
        .with_context(|| format!("{}, you probably need to run builder example from this crate", path.display()))?;
    Ok(source)
}

// splits canned response into header text (without the blank line) and body
pub fn response_split(response: &[u8]) -> Result<(&str, &[u8]), Error> {
    let boundary = response
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .ok_or_else(|| anyhow!("response has no header terminator"))?;

    let header = std::str::from_utf8(&response[..boundary]).context("header is not utf-8")?;
    let body = &response[boundary + 4..];

    Ok((header, body))
}

// finds header value in header text produced by [response_split]
pub fn header_value<'h>(
    header: &'h str,
    name: &str,
) -> Option<&'h str> {
    header
        .split("\r\n")
        .skip(1) // status line
        .find_map(|line| {
            let (line_name, value) = line.split_once(": ")?;
            (line_name == name).then_some(value)
        })
}

// `struct fsdata_file` record as found in generated source
#[derive(Debug)]
pub struct SourceRecord {
    pub identifier: String,
    pub previous: Option<String>,
    pub name_length: usize,
}

// generated source reduced to what the server links against
#[derive(Debug)]
pub struct SourceTable {
    pub data_lengths: HashMap<String, usize>,
    pub records: HashMap<String, SourceRecord>,
    pub root: Option<String>,
    pub count: usize,
}
impl SourceTable {
    // parses output of [fsdata_pack_packer::source::store]
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut data_lengths = HashMap::new();
        let mut records = HashMap::new();
        let mut root = None;
        let mut count = None;

        let mut lines = source.lines();
        while let Some(line) = lines.next() {
            if let Some(rest) = line.strip_prefix("const unsigned char ") {
                let (declaration, _) = rest
                    .split_once("[] = {")
                    .ok_or_else(|| anyhow!("malformed array: {line}"))?;
                // optional attribute precedes the name
                let name = match declaration.rsplit_once(' ') {
                    Some((_attribute, name)) => name,
                    None => declaration,
                };
                let identifier = name
                    .strip_prefix("data_")
                    .ok_or_else(|| anyhow!("malformed array name: {line}"))?
                    .to_owned();

                // bytes until closing brace
                let mut length = 0;
                for line in lines.by_ref() {
                    if line == "};" {
                        break;
                    }
                    length += line.matches("0x").count();
                }

                ensure!(
                    data_lengths.insert(identifier.clone(), length).is_none(),
                    "duplicate array {identifier}"
                );
            } else if let Some(rest) = line.strip_prefix("const struct fsdata_file file_") {
                let (identifier, fields) = rest
                    .split_once("[] = {{")
                    .ok_or_else(|| anyhow!("malformed record: {line}"))?;
                let fields = fields
                    .strip_suffix("}};")
                    .ok_or_else(|| anyhow!("malformed record: {line}"))?
                    .split(", ")
                    .collect::<Vec<_>>();
                ensure!(fields.len() == 5, "malformed record: {line}");

                let previous = match fields[0] {
                    "NULL" => None,
                    previous => Some(
                        previous
                            .strip_prefix("file_")
                            .ok_or_else(|| anyhow!("malformed previous: {line}"))?
                            .to_owned(),
                    ),
                };
                ensure!(fields[1] == format!("data_{identifier}"), "data mismatch: {line}");
                let name_length = fields[2]
                    .strip_prefix(&format!("data_{identifier} + "))
                    .ok_or_else(|| anyhow!("malformed name offset: {line}"))?
                    .parse::<usize>()?;
                ensure!(
                    fields[3] == format!("sizeof(data_{identifier}) - {name_length}"),
                    "length mismatch: {line}"
                );
                ensure!(fields[4] == "FS_FILE_FLAGS_HEADER_INCLUDED", "flags: {line}");

                records.insert(
                    identifier.to_owned(),
                    SourceRecord {
                        identifier: identifier.to_owned(),
                        previous,
                        name_length,
                    },
                );
            } else if let Some(rest) = line.strip_prefix("#define FS_ROOT ") {
                root = match rest {
                    "NULL" => None,
                    rest => Some(
                        rest.strip_prefix("file_")
                            .ok_or_else(|| anyhow!("malformed root: {line}"))?
                            .to_owned(),
                    ),
                };
            } else if let Some(rest) = line.strip_prefix("#define FS_NUMFILES ") {
                count = Some(rest.parse::<usize>()?);
            }
        }

        Ok(Self {
            data_lengths,
            records,
            root,
            count: count.ok_or_else(|| anyhow!("FS_NUMFILES missing"))?,
        })
    }

    // follows records from FS_ROOT like the server does, fails on cycles and
    // dangling references
    pub fn walk(&self) -> Result<Vec<&SourceRecord>, Error> {
        let mut walked = Vec::new();
        let mut next = self.root.as_deref();

        while let Some(identifier) = next {
            ensure!(walked.len() < self.records.len(), "cycle at {identifier}");

            let record = self
                .records
                .get(identifier)
                .ok_or_else(|| anyhow!("dangling reference {identifier}"))?;
            walked.push(record);
            next = record.previous.as_deref();
        }

        Ok(walked)
    }
}
