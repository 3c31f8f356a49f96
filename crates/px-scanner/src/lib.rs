//! Text-level scanning for length declarations inside template regions.
//!
//! This crate locates the pieces a px-to-viewport rewrite operates on, without
//! building an AST of the surrounding markup:
//! - the transformable region bounded by a start/end marker pair
//! - `property: value` declarations whose value is one or more numeric lengths
//! - the individual numeric tokens inside a declaration's value
//!
//! All positions are reported as [`TextRange`]s relative to the string that
//! was scanned, so callers can splice rewritten text back in place.
//!
//! # Example
//!
//! ```
//! use px_scanner::{Markers, RegexScanner, Scanner};
//!
//! let scanner = RegexScanner::new(&Markers::default(), "px").unwrap();
//! let document = r#"<template><div style="margin: 10px 20px"></div></template>"#;
//!
//! let region = scanner.locate_region(document).unwrap();
//! let declarations = scanner.locate_declarations(region.text);
//! assert_eq!(declarations[0].property, "margin");
//! assert_eq!(declarations[0].value, "10px 20px");
//! ```

mod error;
mod scanner;

pub use error::ScanError;
pub use scanner::RegexScanner;
pub use text_size::{TextRange, TextSize};

/// The marker pair delimiting a transformable region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Literal text opening the region (matched case-insensitively).
    pub start: String,
    /// Literal text closing the region (matched case-insensitively).
    pub end: String,
}

impl Markers {
    /// Creates a marker pair.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for Markers {
    /// Vue single-file component template tags.
    fn default() -> Self {
        Self::new("<template>", "</template>")
    }
}

/// A transformable region found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    /// Range of the region in the document, markers included.
    pub range: TextRange,
    /// The region text, markers included.
    pub text: &'a str,
}

/// A `property: value` occurrence inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// The property name as written (not normalized).
    pub property: &'a str,
    /// The run of numeric length tokens following the colon.
    pub value: &'a str,
    /// Range of `value` in the scanned region.
    pub value_range: TextRange,
    /// Range of the whole match (property, colon, quotes, value).
    pub range: TextRange,
}

/// A `<digits><unit>` token inside a declaration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericToken<'a> {
    /// The digit run without the unit.
    pub digits: &'a str,
    /// Range of the token (digits and unit) in the scanned value.
    pub range: TextRange,
}

impl NumericToken<'_> {
    /// Returns the numeric value of the token.
    pub fn value(&self) -> Option<f64> {
        self.digits.parse().ok()
    }
}

/// Locates regions, declarations and numeric tokens in raw text.
///
/// The replacement engine only talks to this trait, so a markup-aware
/// implementation can replace [`RegexScanner`] without touching the matcher
/// or the converter.
pub trait Scanner {
    /// Returns the first transformable region in `document`, if any.
    fn locate_region<'a>(&self, document: &'a str) -> Option<Region<'a>>;

    /// Returns every declaration with at least one numeric token, in order.
    fn locate_declarations<'a>(&self, region: &'a str) -> Vec<Declaration<'a>>;

    /// Returns every numeric token in a declaration value, in order.
    fn locate_tokens<'a>(&self, value: &'a str) -> Vec<NumericToken<'a>>;
}

/// Builds a range from byte offsets.
pub(crate) fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}
