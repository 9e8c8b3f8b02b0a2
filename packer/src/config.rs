//! Configuration file. Contains [Config], loadable from TOML, used to adjust
//! resolution tables and generated source without recompiling the packer.

use crate::{
    common::{SERVER_NAME_DEFAULT, cache_control::CacheControl, metadata::Override},
    entry::BuildOptions,
    metadata::ResolveOptions,
    source::SourceOptions,
};
use anyhow::{Context, Error};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Packer configuration.
///
/// Every field is optional, missing ones keep built-in behavior:
///
/// ```toml
/// # `Server` header value
/// server = "OpenAce"
/// # attribute of data arrays, empty string to skip
/// data_attribute = "__in_flash()"
///
/// # extends built-in suffix -> content-type table
/// [content_types]
/// svg = "image/svg+xml"
///
/// # suffix -> max-age seconds
/// [cache_control]
/// ico = 86400
///
/// # replaces built-in override table when present
/// [overrides."/index.html.gz"]
/// cache_control = 300
///
/// [overrides."/generate_204"]
/// headers_included = true
/// ```
#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `Server` header value.
    pub server: String,
    /// Attribute of data arrays, empty to skip.
    pub data_attribute: String,
    /// Additional or replaced suffix -> `content-type` mappings.
    pub content_types: HashMap<String, String>,
    /// Suffix -> [CacheControl] mappings.
    pub cache_control: HashMap<String, CacheControl>,
    /// Override table, replacing built-in one if set.
    pub overrides: Option<HashMap<String, Override>>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            server: SERVER_NAME_DEFAULT.to_owned(),
            data_attribute: SourceOptions::default()
                .data_attribute
                .unwrap_or_default(),
            content_types: HashMap::new(),
            cache_control: HashMap::new(),
            overrides: None,
        }
    }
}
impl Config {
    /// Parses configuration from TOML document.
    pub fn from_toml(document: &str) -> Result<Self, Error> {
        let config = toml::from_str(document)?;
        Ok(config)
    }

    /// Reads configuration from TOML file under `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let document =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config = Self::from_toml(&document).with_context(|| format!("parse {}", path.display()))?;

        Ok(config)
    }

    /// [ResolveOptions] with tables of [self] applied over defaults.
    pub fn resolve_options(&self) -> ResolveOptions {
        let mut resolve_options = ResolveOptions::default();

        resolve_options.content_types.extend(
            self.content_types
                .iter()
                .map(|(suffix, content_type)| (suffix.clone(), content_type.clone())),
        );
        resolve_options.cache_controls.extend(
            self.cache_control
                .iter()
                .map(|(suffix, cache_control)| (suffix.clone(), *cache_control)),
        );
        if let Some(overrides) = &self.overrides {
            resolve_options.overrides.clone_from(overrides);
        }

        resolve_options
    }

    /// [BuildOptions] for this configuration, without compression.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            resolve: self.resolve_options(),
            server: self.server.clone(),
            compression: None,
        }
    }

    /// [SourceOptions] for this configuration.
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            data_attribute: if self.data_attribute.is_empty() {
                None
            } else {
                Some(self.data_attribute.clone())
            },
        }
    }
}
