//! Three-layer option resolution.
//!
//! Options are resolved fresh for every transform invocation:
//! 1. built-in defaults
//! 2. the sections of the discovered PostCSS config belonging to a known
//!    px-to-viewport plugin, later namespaces winning
//! 3. the overrides passed to the plugin
//!
//! Each layer wins over the previous one leaf by leaf. Arrays merge index by
//! index, so a shorter array only replaces the leading elements.

use crate::error::PluginError;
use postcss_config::{ConfigLoader, PostcssConfig};
use px_transform::{Options, PartialOptions};
use serde_json::{Map, Value};

/// PostCSS plugins whose options this plugin understands, lowest priority first.
pub const KNOWN_PLUGINS: &[&str] = &[
    "postcss-px-to-viewport",
    "postcss-px-to-viewport-8-plugin",
];

/// Deep-merges `over` into `base`.
///
/// Objects merge key by key and arrays index by index; any other value in
/// `over` replaces the one in `base`.
pub fn merge_values(base: &mut Value, over: Value) {
    match (base, over) {
        (Value::Object(base), Value::Object(over)) => {
            for (key, value) in over {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(over)) => {
            for (i, value) in over.into_iter().enumerate() {
                match base.get_mut(i) {
                    Some(slot) => merge_values(slot, value),
                    None => base.push(value),
                }
            }
        }
        (base, over) => *base = over,
    }
}

/// Extracts the px-to-viewport options of a discovered config.
pub fn external_options(config: &PostcssConfig) -> Result<PartialOptions, PluginError> {
    let mut merged = Value::Object(Map::new());
    for name in KNOWN_PLUGINS {
        if let Some(section) = config.plugin_options(name) {
            merge_values(&mut merged, section.clone());
        }
    }

    serde_json::from_value(merged).map_err(|source| PluginError::InvalidOptions {
        location: config
            .path
            .as_ref()
            .map_or_else(|| "PostCSS config".to_string(), |p| p.to_string()),
        source,
    })
}

/// Resolves the effective options from defaults, the discovered config and overrides.
pub fn resolve_options(
    overrides: &PartialOptions,
    loader: &ConfigLoader,
) -> Result<Options, PluginError> {
    let config = loader.load()?;
    let external = external_options(&config)?;
    Ok(Options::from(external.merge(overrides.clone())))
}
