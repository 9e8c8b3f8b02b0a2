//! fsdata-pack-packer turns a directory of web assets into a C source file with
//! the `fsdata` table used by small embedded http servers (lwIP `httpd` style):
//! a byte array per file holding its name and a complete, canned http
//! response, and a linked list of `struct fsdata_file` records pointing into
//! them. The generated file is compiled into firmware, no filesystem is needed
//! at runtime.
//!
//! This crate is used at build time, not in the target application. It can be
//! used in two ways:
//! - As a standalone application, `fsdata-pack-packer`, in build scripts / CI.
//! - As a library, eg. from build.rs.
//!
//! # What goes into the table
//!
//! Every regular file under the input directory becomes one entry, in pack
//! path order. For each file:
//! - [metadata::resolve] infers `Content-type`, `Content-Encoding` and
//!   `Cache-Control` from file name suffixes. Precompressed files (`.gz`,
//!   `.br`) take their type from the preceding suffix and are served under
//!   their name without the encoding suffix, so `/app.js.gz` answers requests
//!   for `/app.js`. Per-path overrides take precedence.
//! - [header::Header] synthesizes the `HTTP/1.0 200 OK` response header, unless
//!   the file is marked as already containing one (eg. `/generate_204` probes).
//! - [entry] concatenates name, NUL, header and body.
//!
//! [pack::Builder] orders entries, rejects identifier collisions and builds
//! [fsdata::FsData], which [source] writes out.
//!
//! # Using as a standalone application
//!
//! ```text
//! $ fsdata-pack-packer directory-single ./gui/dist ./src/fsdata.c
//! $ fsdata-pack-packer directory-single --config fsdata.toml ./gui/dist ./src/fsdata.c
//! $ fsdata-pack-packer json-header ./config/default.json ./src/default_config.hpp
//! ```
//!
//! See `--help` for all options and [config::Config] for configuration file
//! format.
//!
//! # Using as a library
//!
//! ```no_run
//! # use anyhow::Error;
//! # use std::path::PathBuf;
//! # use fsdata_pack_packer::{
//! #     directory::{search, SearchOptions},
//! #     entry::BuildOptions,
//! #     pack::Builder,
//! #     source::{store_file, SourceOptions},
//! # };
//! # fn main() -> Result<(), Error> {
//! // start with empty builder
//! let mut pack = Builder::new();
//!
//! // add files with directory search and default options
//! pack.entries_add(search(
//!     &PathBuf::from("gui/dist"),
//!     &SearchOptions::default(),
//!     &BuildOptions::default(),
//! )?)?;
//!
//! // finalize the builder, obtain the table
//! let fsdata = pack.finalize();
//!
//! // write C source to be compiled into firmware
//! store_file(&fsdata, &SourceOptions::default(), &PathBuf::from("src/fsdata.c"))?;
//! # Ok(())
//! # }
//! ```
//!
//! [json_header] is an unrelated, smaller tool sharing the byte array writer:
//! it strips private keys from a JSON document and emits it as a C++ header.

#![allow(clippy::new_without_default)]
#![warn(missing_docs)]

pub use fsdata_pack_common as common;

pub mod compression;
pub mod config;
pub mod directory;
pub mod entry;
pub mod fsdata;
pub mod header;
pub mod json_header;
pub mod metadata;
pub mod pack;
pub mod pack_path;
pub mod source;
