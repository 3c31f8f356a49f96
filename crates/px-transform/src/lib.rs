//! px to viewport unit rewriting for template fragments.
//!
//! This crate rewrites absolute lengths written inside a template region
//! (inline `style` attributes, style bindings) into viewport units:
//! - [`Converter`] turns a pixel quantity into a rounded viewport quantity
//! - [`PropListMatcher`] decides which properties are converted
//! - [`transform_document`] ties them together with a [`px_scanner::Scanner`]
//!
//! # Example
//!
//! ```
//! use px_transform::{transform_document, Options, Target};
//!
//! let source = r#"<template><div style="width: 100px; letter-spacing: 2px;"></div></template>"#;
//! let options = Options {
//!     prop_list: vec!["*".into(), "!letter-spacing".into()],
//!     ..Default::default()
//! };
//!
//! let output = transform_document(source, "src/App.vue", &options, &Target::default()).unwrap();
//! assert!(output.contains("width: 13.33333vw; letter-spacing: 2px;"));
//! ```

mod converter;
mod engine;
mod options;
mod prop_list;

pub use converter::{format_number, to_fixed, Converter};
pub use engine::{rewrite_region, transform_document, Target};
pub use options::{merge_rules, FilePatterns, Options, PartialOptions, ViewportWidth};
pub use prop_list::{normalize_property, PropListMatcher};
pub use px_scanner::{Markers, RegexScanner, Scanner};
