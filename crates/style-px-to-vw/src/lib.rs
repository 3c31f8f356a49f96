//! Build plugin converting px lengths in Vue templates into viewport units.
//!
//! PostCSS only sees `<style>` blocks, so lengths written in a component's
//! template (inline `style` attributes and style bindings) stay absolute.
//! This plugin rewrites them before the template compiler runs, reusing the
//! options of a `postcss-px-to-viewport` plugin declared in the project's
//! PostCSS config.
//!
//! # Example
//!
//! ```no_run
//! use style_px_to_vw::{style_px_to_vw, HostPlugin, PartialOptions};
//!
//! let plugin = style_px_to_vw(Some(PartialOptions {
//!     viewport_width: Some(375.into()),
//!     ..Default::default()
//! }));
//!
//! let source = r#"<template><div style="width: 75px"></div></template>"#;
//! if let Some(output) = plugin.transform(source, "src/App.vue")? {
//!     assert!(output.code.contains("width: 20vw"));
//! }
//! # Ok::<(), style_px_to_vw::PluginError>(())
//! ```

mod error;
mod order;
mod plugin;
mod resolve;

pub use error::PluginError;
pub use order::{validate_plugin_order, OrderingViolation, PipelineConfig, VUE_PLUGIN_NAME};
pub use plugin::{style_px_to_vw, HostPlugin, StylePxToVw, TransformOutput, PLUGIN_NAME};
pub use resolve::{external_options, merge_values, resolve_options, KNOWN_PLUGINS};

pub use postcss_config::{ConfigContext, ConfigError, ConfigLoader, PostcssConfig};
pub use px_transform::{FilePatterns, Markers, Options, PartialOptions, Target, ViewportWidth};
