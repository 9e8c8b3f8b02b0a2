//! Common crate, containing types shared between the
//! [fsdata-pack-packer](../fsdata_pack_packer/index.html) library, its command
//! line tool and the integration tests.
//!
//! The central type of this crate is [pack_path::PackPath], the path a file is
//! served under by the embedded http server (eg. `/index.html.gz`). Every
//! served file gets a [metadata::Metadata] (`content-type`,
//! [content_encoding::ContentEncoding] and [cache_control::CacheControl]),
//! either inferred from the file name or forced by a [metadata::Override].
//!
//! All types here are plain values. Override tables are deserializable with
//! [serde], so they can be loaded from a configuration file instead of being
//! compiled in.

#![warn(missing_docs)]

pub mod cache_control;
pub mod content_encoding;
pub mod metadata;
pub mod pack_path;

/// Value of the `Server` header placed in every synthesized response.
pub const SERVER_NAME_DEFAULT: &str = "OpenAce";
