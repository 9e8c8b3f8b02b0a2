//! JSON header helpers. Turns a JSON configuration document into a C++ header
//! with the document bytes as a NUL terminated constant array, so firmware can
//! ship default configuration without a filesystem.
//!
//! Keys starting with the private prefix (by default `_`) are comments or
//! editor metadata and are removed at any depth before the document is
//! serialized in its most compact form.

use crate::source::{self, ByteArrayFormat, LineBreak};
use anyhow::{Context, Error};
use serde_json::Value;
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Format of the configuration array.
pub const JSON_BYTE_ARRAY_FORMAT: ByteArrayFormat = ByteArrayFormat {
    bytes_per_line: 20,
    indent: "    ",
    uppercase: true,
    line_break: LineBreak::Leading,
};

/// Options for [store] and friends.
///
/// If not sure what to set here, use [Default].
#[derive(Clone, Debug)]
pub struct Options {
    /// Name of generated array.
    pub array_name: String,
    /// Keys starting with this prefix are removed. Empty prefix removes
    /// nothing.
    pub private_prefix: String,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            array_name: "DEFAULT_OPENACE_CONFIG".to_owned(),
            private_prefix: "_".to_owned(),
        }
    }
}

/// Removes object keys starting with `private_prefix`, recursively, including
/// objects nested in arrays. Key order of remaining fields is kept.
///
/// # Examples
///
/// ```
/// # use fsdata_pack_packer::json_header::strip_private;
/// # use serde_json::json;
/// #
/// let value = strip_private(
///     json!({"_comment": "x", "a": [{"_b": 1, "c": 2}]}),
///     "_",
/// );
/// assert_eq!(value, json!({"a": [{"c": 2}]}));
/// ```
pub fn strip_private(
    value: Value,
    private_prefix: &str,
) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .filter(|(key, _)| private_prefix.is_empty() || !key.starts_with(private_prefix))
                .map(|(key, value)| (key, strip_private(value, private_prefix)))
                .collect(),
        ),
        Value::Array(array) => Value::Array(
            array
                .into_iter()
                .map(|value| strip_private(value, private_prefix))
                .collect(),
        ),
        value => value,
    }
}

/// Writes header with `value` as array to `writer`. `value` is written as
/// is, call [strip_private] first.
pub fn store(
    value: &Value,
    options: &Options,
    mut writer: impl Write,
) -> Result<(), Error> {
    // compact, no whitespace between tokens
    let bytes = serde_json::to_vec(value).context("serialize json")?;

    writer.write_all(b"#pragma once\n\n")?;
    write!(
        writer,
        "static constexpr uint8_t {}[] = {{",
        options.array_name
    )?;
    source::write_byte_array(&mut writer, &bytes, &JSON_BYTE_ARRAY_FORMAT)?;
    writer.write_all(b"0x00};\n")?;

    Ok(())
}

/// Generates header to memory.
pub fn store_memory(
    value: &Value,
    options: &Options,
) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    store(value, options, &mut buffer)?;
    Ok(buffer)
}

/// Reads JSON document from `input_path`, removes private keys and writes
/// header to `output_path`. Output is replaced atomically.
pub fn store_file(
    input_path: &Path,
    output_path: &Path,
    options: &Options,
) -> Result<(), Error> {
    let value = load_file(input_path)?;
    let value = strip_private(value, &options.private_prefix);
    log::debug!("{}: {value}", input_path.display());

    source::store_file_atomic(output_path, |writer| store(&value, options, writer))
}

/// Reads JSON document from `path`.
pub fn load_file(path: &Path) -> Result<Value, Error> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse {}", path.display()))?;

    Ok(value)
}
