//! Source code generation. Contains [store], writing [FsData] as C source with
//! one byte array and one `struct fsdata_file` per file, and [write_byte_array]
//! shared with [crate::json_header].

use crate::fsdata::FsData;
use anyhow::{Context, Error};
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};
use tempfile::NamedTempFile;

/// Where line breaks are placed when writing byte array literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineBreak {
    /// Break before every `bytes_per_line`-th byte, including the first one.
    Leading,
    /// Break after every `bytes_per_line`-th byte, including the last one if
    /// it completes a line.
    Trailing,
}

/// Formatting of [write_byte_array] output.
#[derive(Clone, Copy, Debug)]
pub struct ByteArrayFormat {
    /// Number of bytes in a single line.
    pub bytes_per_line: usize,
    /// Written after each line break.
    pub indent: &'static str,
    /// `0xAB` instead of `0xab`.
    pub uppercase: bool,
    /// Line break placement.
    pub line_break: LineBreak,
}

/// Format of data arrays in fsdata source.
pub const FSDATA_BYTE_ARRAY_FORMAT: ByteArrayFormat = ByteArrayFormat {
    bytes_per_line: 10,
    indent: "\t",
    uppercase: false,
    line_break: LineBreak::Trailing,
};

/// Writes `bytes` as comma separated hex literals, each followed by `, `.
///
/// Opening and closing braces are up to the caller.
pub fn write_byte_array(
    writer: &mut impl Write,
    bytes: &[u8],
    format: &ByteArrayFormat,
) -> Result<(), io::Error> {
    for (index, byte) in bytes.iter().enumerate() {
        if format.line_break == LineBreak::Leading && index % format.bytes_per_line == 0 {
            write!(writer, "\n{}", format.indent)?;
        }

        if format.uppercase {
            write!(writer, "0x{byte:02X}, ")?;
        } else {
            write!(writer, "0x{byte:02x}, ")?;
        }

        if format.line_break == LineBreak::Trailing && (index + 1) % format.bytes_per_line == 0 {
            write!(writer, "\n{}", format.indent)?;
        }
    }

    Ok(())
}

/// Options for [store] and friends.
///
/// If not sure what to set here, use [Default].
#[derive(Clone, Debug)]
pub struct SourceOptions {
    /// Attribute placed between type and name of data arrays, eg.
    /// `__in_flash()` to keep them in flash on rp2040. [None] to skip.
    pub data_attribute: Option<String>,
}
impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            data_attribute: Some("__in_flash()".to_owned()),
        }
    }
}

/// Writes `fsdata` as C source to `writer`.
///
/// Output consists of:
/// - `data_<identifier>` byte array for each file, in table order,
/// - `file_<identifier>` record for each file, pointing to previous record,
///   its data, its response (data after name) and response length,
/// - `FS_ROOT` (last record) and `FS_NUMFILES` definitions.
pub fn store(
    fsdata: &FsData,
    options: &SourceOptions,
    mut writer: impl Write,
) -> Result<(), Error> {
    let data_prefix = match &options.data_attribute {
        Some(data_attribute) => format!("const unsigned char {data_attribute} data_"),
        None => "const unsigned char data_".to_owned(),
    };

    for file in fsdata.files() {
        write!(writer, "{data_prefix}{}[] = {{\n\t", file.identifier)?;
        write_byte_array(&mut writer, &file.entry.data, &FSDATA_BYTE_ARRAY_FORMAT)?;
        writer.write_all(b"\n};\n\n")?;
    }

    for file in fsdata.files() {
        let previous = match file.previous {
            Some(previous) => format!("file_{}", fsdata.files()[previous].identifier),
            None => "NULL".to_owned(),
        };
        let identifier = &file.identifier;
        let name_length = file.name_length();

        writeln!(
            writer,
            "const struct fsdata_file file_{identifier}[] = {{{{{previous}, data_{identifier}, data_{identifier} + {name_length}, sizeof(data_{identifier}) - {name_length}, FS_FILE_FLAGS_HEADER_INCLUDED}}}};"
        )?;
    }

    let root = match fsdata.root() {
        Some(root) => format!("file_{}", fsdata.files()[root].identifier),
        None => "NULL".to_owned(),
    };

    writer.write_all(b"\n\n")?;
    writeln!(writer, "#define FS_ROOT {root}")?;
    writeln!(writer, "#define FS_NUMFILES {}", fsdata.len())?;

    Ok(())
}

/// Generates source to memory.
pub fn store_memory(
    fsdata: &FsData,
    options: &SourceOptions,
) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    store(fsdata, options, &mut buffer)?;
    Ok(buffer)
}

/// Generates source to file under `path`.
///
/// Output is written to temporary file next to `path` and renamed, so `path`
/// either keeps old contents or gets complete new ones.
pub fn store_file(
    fsdata: &FsData,
    options: &SourceOptions,
    path: &Path,
) -> Result<(), Error> {
    store_file_atomic(path, |writer| store(fsdata, options, writer))
}

/// Runs `store` against temporary file in `path` directory, then replaces
/// `path` with it.
pub fn store_file_atomic(
    path: &Path,
    store: impl FnOnce(&mut dyn Write) -> Result<(), Error>,
) -> Result<(), Error> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory)
        .with_context(|| format!("create temporary file in {}", directory.display()))?;

    let mut writer = BufWriter::new(&mut file);
    store(&mut writer)?;
    writer.flush()?;
    drop(writer);

    file.as_file().sync_all()?;

    // keep permissions of replaced file, temporary files are created private
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(file.path(), metadata.permissions())?;
    }

    file.persist(path)
        .with_context(|| format!("write {}", path.display()))?;

    log::info!("written {}", path.display());

    Ok(())
}
