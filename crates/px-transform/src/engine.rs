//! Template rewriting.

use crate::converter::Converter;
use crate::options::Options;
use crate::prop_list::{normalize_property, PropListMatcher};
use px_scanner::{Markers, RegexScanner, Scanner};
use std::ops::Range;

/// The kind of document a transform applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Suffix a document id must end with.
    pub extension: String,
    /// Markers delimiting the transformable region.
    pub markers: Markers,
}

impl Default for Target {
    /// Vue single-file components.
    fn default() -> Self {
        Self {
            extension: ".vue".to_string(),
            markers: Markers::default(),
        }
    }
}

/// Rewrites the transformable region of a document.
///
/// Returns `None` when the document is not eligible (wrong kind, filtered by
/// include/exclude, no region, unusable options). Otherwise returns the whole
/// document with the first region rewritten, even if nothing in it changed.
pub fn transform_document(
    document: &str,
    id: &str,
    options: &Options,
    target: &Target,
) -> Option<String> {
    if !id.ends_with(target.extension.as_str()) {
        return None;
    }
    if !options.is_eligible(id) {
        log::debug!("skipping {id}: filtered by include/exclude");
        return None;
    }

    let scanner = match RegexScanner::new(&target.markers, &options.unit_to_convert) {
        Ok(scanner) => scanner,
        Err(err) => {
            log::warn!("skipping {id}: {err}");
            return None;
        }
    };
    let region = scanner.locate_region(document)?;

    let viewport_size = options.viewport_width.resolve(id);
    if !(viewport_size.is_finite() && viewport_size > 0.0) {
        log::warn!("skipping {id}: viewport width must be a positive number, got {viewport_size}");
        return None;
    }

    let converter = Converter {
        viewport_size,
        precision: options.unit_precision,
        min_pixel_value: options.min_pixel_value,
        unit: options.viewport_unit.clone(),
    };
    let matcher = PropListMatcher::new(&options.prop_list);
    let rewritten = rewrite_region(region.text, &scanner, &matcher, &converter);

    let mut output = document.to_string();
    output.replace_range(Range::<usize>::from(region.range), &rewritten);
    Some(output)
}

/// Rewrites every accepted declaration in `region`.
///
/// Rejected declarations, tokens at or below the threshold and all text
/// between tokens are copied verbatim.
pub fn rewrite_region(
    region: &str,
    scanner: &impl Scanner,
    matcher: &PropListMatcher,
    converter: &Converter,
) -> String {
    let mut output = String::with_capacity(region.len());
    let mut cursor = 0;

    for declaration in scanner.locate_declarations(region) {
        if !matcher.matches(&normalize_property(declaration.property)) {
            continue;
        }

        let value_start = usize::from(declaration.value_range.start());
        for token in scanner.locate_tokens(declaration.value) {
            let Some(converted) = token.value().and_then(|px| converter.convert(px)) else {
                continue;
            };
            let range = Range::<usize>::from(token.range);
            let start = value_start + range.start;
            output.push_str(&region[cursor..start]);
            output.push_str(&converted);
            cursor = value_start + range.end;
        }
    }

    output.push_str(&region[cursor..]);
    output
}
