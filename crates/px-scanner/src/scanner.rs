//! Regex-backed scanner.

use crate::{text_range, Declaration, Markers, NumericToken, Region, ScanError, Scanner};
use regex::Regex;

/// A [`Scanner`] working directly on raw text with regular expressions.
///
/// Declarations are recognised as `identifier: value` where the value is one
/// or more single-space separated `<digits><unit>` tokens, optionally wrapped
/// in single or double quotes. Decimal lengths (`10.5px`) are not matched.
#[derive(Debug, Clone)]
pub struct RegexScanner {
    region: Regex,
    declaration: Regex,
    token: Regex,
}

impl RegexScanner {
    /// Builds a scanner for the given markers and absolute unit.
    pub fn new(markers: &Markers, unit: &str) -> Result<Self, ScanError> {
        if unit.is_empty() {
            return Err(ScanError::EmptyUnit);
        }
        if markers.start.is_empty() || markers.end.is_empty() {
            return Err(ScanError::EmptyMarker);
        }

        let unit = regex::escape(unit);
        let region = Regex::new(&format!(
            "(?i){}(?s:.+){}",
            regex::escape(&markers.start),
            regex::escape(&markers.end)
        ))?;
        let declaration = Regex::new(&format!(
            r#"([a-zA-Z-]+):\s*['"]?([0-9]+{unit}(?:\s[0-9]+{unit})*)['"]?"#
        ))?;
        let token = Regex::new(&format!("([0-9]+){unit}"))?;

        Ok(Self {
            region,
            declaration,
            token,
        })
    }
}

impl Scanner for RegexScanner {
    fn locate_region<'a>(&self, document: &'a str) -> Option<Region<'a>> {
        self.region.find(document).map(|m| Region {
            range: text_range(m.start(), m.end()),
            text: m.as_str(),
        })
    }

    fn locate_declarations<'a>(&self, region: &'a str) -> Vec<Declaration<'a>> {
        self.declaration
            .captures_iter(region)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let property = caps.get(1)?;
                let value = caps.get(2)?;
                Some(Declaration {
                    property: property.as_str(),
                    value: value.as_str(),
                    value_range: text_range(value.start(), value.end()),
                    range: text_range(whole.start(), whole.end()),
                })
            })
            .collect()
    }

    fn locate_tokens<'a>(&self, value: &'a str) -> Vec<NumericToken<'a>> {
        self.token
            .captures_iter(value)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let digits = caps.get(1)?;
                Some(NumericToken {
                    digits: digits.as_str(),
                    range: text_range(whole.start(), whole.end()),
                })
            })
            .collect()
    }
}
