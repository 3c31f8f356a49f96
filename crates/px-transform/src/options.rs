//! Transform options.

use regex::Regex;
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

/// Reference viewport width used as the 100% basis of the conversion.
#[derive(Clone)]
pub enum ViewportWidth {
    /// The same width for every document.
    Fixed(f64),
    /// A width computed from the document id.
    PerDocument(Arc<dyn Fn(&str) -> f64 + Send + Sync>),
}

impl ViewportWidth {
    /// Creates a width computed per document.
    pub fn per_document(resolve: impl Fn(&str) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerDocument(Arc::new(resolve))
    }

    /// Resolves the width for the given document id.
    pub fn resolve(&self, id: &str) -> f64 {
        match self {
            Self::Fixed(width) => *width,
            Self::PerDocument(resolve) => resolve(id),
        }
    }
}

impl fmt::Debug for ViewportWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(width) => f.debug_tuple("Fixed").field(width).finish(),
            Self::PerDocument(_) => f.write_str("PerDocument(..)"),
        }
    }
}

impl From<f64> for ViewportWidth {
    fn from(width: f64) -> Self {
        Self::Fixed(width)
    }
}

impl From<u32> for ViewportWidth {
    fn from(width: u32) -> Self {
        Self::Fixed(f64::from(width))
    }
}

impl<'de> Deserialize<'de> for ViewportWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::Fixed)
    }
}

/// Regular expressions matched against document ids.
#[derive(Debug, Clone)]
pub struct FilePatterns(Vec<Regex>);

impl FilePatterns {
    /// Compiles one or more patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Returns true if any pattern matches the id.
    pub fn is_match(&self, id: &str) -> bool {
        self.0.iter().any(|re| re.is_match(id))
    }

    /// Returns the compiled patterns.
    pub fn patterns(&self) -> &[Regex] {
        &self.0
    }
}

impl From<Regex> for FilePatterns {
    fn from(re: Regex) -> Self {
        Self(vec![re])
    }
}

impl From<Vec<Regex>> for FilePatterns {
    fn from(patterns: Vec<Regex>) -> Self {
        Self(patterns)
    }
}

impl<'de> Deserialize<'de> for FilePatterns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        let patterns = match Raw::deserialize(deserializer)? {
            Raw::One(pattern) => vec![pattern],
            Raw::Many(patterns) => patterns,
        };
        Self::new(&patterns).map_err(de::Error::custom)
    }
}

/// Options with every field optional.
///
/// Used for both the namespaced section of an external PostCSS config and
/// the overrides passed by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    /// Unit to convert.
    pub unit_to_convert: Option<String>,
    /// Viewport width of the design draft.
    pub viewport_width: Option<ViewportWidth>,
    /// Viewport height of the design draft.
    pub viewport_height: Option<f64>,
    /// Decimal places kept after conversion.
    pub unit_precision: Option<u32>,
    /// Viewport unit to convert to.
    pub viewport_unit: Option<String>,
    /// Viewport unit for font properties.
    pub font_viewport_unit: Option<String>,
    /// Property-list rules.
    pub prop_list: Option<Vec<String>>,
    /// Minimum value that gets converted (exclusive).
    pub min_pixel_value: Option<f64>,
    /// Document ids never transformed.
    pub exclude: Option<FilePatterns>,
    /// Document ids eligible for transformation.
    pub include: Option<FilePatterns>,
}

impl PartialOptions {
    /// Merges two layers; fields set in `over` win.
    ///
    /// Property lists merge index by index, so `["*"]` over
    /// `["*", "!font*"]` keeps the negation.
    pub fn merge(self, over: PartialOptions) -> PartialOptions {
        let prop_list = match (self.prop_list, over.prop_list) {
            (Some(mut base), Some(over)) => {
                merge_rules(&mut base, over);
                Some(base)
            }
            (base, over) => over.or(base),
        };

        PartialOptions {
            unit_to_convert: over.unit_to_convert.or(self.unit_to_convert),
            viewport_width: over.viewport_width.or(self.viewport_width),
            viewport_height: over.viewport_height.or(self.viewport_height),
            unit_precision: over.unit_precision.or(self.unit_precision),
            viewport_unit: over.viewport_unit.or(self.viewport_unit),
            font_viewport_unit: over.font_viewport_unit.or(self.font_viewport_unit),
            prop_list,
            min_pixel_value: over.min_pixel_value.or(self.min_pixel_value),
            exclude: over.exclude.or(self.exclude),
            include: over.include.or(self.include),
        }
    }
}

/// Fully resolved options for one transform invocation.
#[derive(Debug, Clone)]
pub struct Options {
    /// Unit to convert.
    pub unit_to_convert: String,
    /// Viewport width of the design draft.
    pub viewport_width: ViewportWidth,
    /// Viewport height of the design draft. Not used by the conversion.
    pub viewport_height: Option<f64>,
    /// Decimal places kept after conversion.
    pub unit_precision: u32,
    /// Viewport unit to convert to.
    pub viewport_unit: String,
    /// Viewport unit for font properties. Not used by the conversion.
    pub font_viewport_unit: String,
    /// Property-list rules.
    pub prop_list: Vec<String>,
    /// Values at or below this are left as is.
    pub min_pixel_value: f64,
    /// Document ids never transformed, even when included.
    pub exclude: Option<FilePatterns>,
    /// When set, only matching document ids are transformed.
    pub include: Option<FilePatterns>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unit_to_convert: "px".to_string(),
            viewport_width: ViewportWidth::Fixed(750.0),
            viewport_height: None,
            unit_precision: 5,
            viewport_unit: "vw".to_string(),
            font_viewport_unit: "vw".to_string(),
            prop_list: vec!["*".to_string()],
            min_pixel_value: 1.0,
            exclude: None,
            include: None,
        }
    }
}

impl Options {
    /// Overlays the fields set in `partial`.
    pub fn apply(&mut self, partial: PartialOptions) {
        let PartialOptions {
            unit_to_convert,
            viewport_width,
            viewport_height,
            unit_precision,
            viewport_unit,
            font_viewport_unit,
            prop_list,
            min_pixel_value,
            exclude,
            include,
        } = partial;

        if let Some(unit) = unit_to_convert {
            self.unit_to_convert = unit;
        }
        if let Some(width) = viewport_width {
            self.viewport_width = width;
        }
        if viewport_height.is_some() {
            self.viewport_height = viewport_height;
        }
        if let Some(precision) = unit_precision {
            self.unit_precision = precision;
        }
        if let Some(unit) = viewport_unit {
            self.viewport_unit = unit;
        }
        if let Some(unit) = font_viewport_unit {
            self.font_viewport_unit = unit;
        }
        if let Some(rules) = prop_list {
            merge_rules(&mut self.prop_list, rules);
        }
        if let Some(min) = min_pixel_value {
            self.min_pixel_value = min;
        }
        if exclude.is_some() {
            self.exclude = exclude;
        }
        if include.is_some() {
            self.include = include;
        }
    }

    /// Returns whether the document id passes include/exclude.
    ///
    /// Exclusion wins over inclusion.
    pub fn is_eligible(&self, id: &str) -> bool {
        let included = self.include.as_ref().map_or(true, |p| p.is_match(id));
        let excluded = self.exclude.as_ref().is_some_and(|p| p.is_match(id));
        included && !excluded
    }
}

impl From<PartialOptions> for Options {
    fn from(partial: PartialOptions) -> Self {
        let mut options = Options::default();
        options.apply(partial);
        options
    }
}

/// Overlays `over` onto `base` index by index, keeping the tail of `base`.
pub fn merge_rules(base: &mut Vec<String>, over: Vec<String>) {
    for (i, rule) in over.into_iter().enumerate() {
        match base.get_mut(i) {
            Some(slot) => *slot = rule,
            None => base.push(rule),
        }
    }
}
