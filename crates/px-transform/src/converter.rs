//! Absolute length to viewport unit conversion.

/// Rounds `number` to `precision` decimals.
///
/// The value is first truncated at one extra digit and only then rounded, so
/// that binary noise past that digit (`13.333333333333334`) cannot push the
/// result across a rounding boundary.
///
/// Precisions too large for an `f64` exponent saturate and yield `NaN`.
pub fn to_fixed(number: f64, precision: u32) -> f64 {
    let exponent = i32::try_from(precision)
        .ok()
        .and_then(|p| p.checked_add(1))
        .unwrap_or(i32::MAX);
    let multiplier = 10f64.powi(exponent);
    let whole = (number * multiplier).floor();
    (whole / 10.0).round() * 10.0 / multiplier
}

/// Formats a converted number the way it is written back into the template.
///
/// Integral values lose their fractional part (`10` rather than `10.0`).
pub fn format_number(number: f64) -> String {
    format!("{number}")
}

/// Converts pixel quantities into a viewport unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    /// Reference viewport dimension, must be positive.
    pub viewport_size: f64,
    /// Decimal places kept in the output.
    pub precision: u32,
    /// Values at or below this threshold are left untouched.
    pub min_pixel_value: f64,
    /// Unit suffix appended to converted values.
    pub unit: String,
}

impl Converter {
    /// Converts `pixels`, or returns `None` when the value is below the threshold.
    pub fn convert(&self, pixels: f64) -> Option<String> {
        if pixels <= self.min_pixel_value {
            return None;
        }
        let value = to_fixed(pixels / self.viewport_size * 100.0, self.precision);
        Some(format!("{}{}", format_number(value), self.unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn converter(precision: u32) -> Converter {
        Converter {
            viewport_size: 750.0,
            precision,
            min_pixel_value: 1.0,
            unit: "vw".to_string(),
        }
    }

    #[test]
    fn test_to_fixed_truncates_before_rounding() {
        assert_eq!(to_fixed(13.333333333333334, 5), 13.33333);
        assert_eq!(to_fixed(2.6666666666666665, 2), 2.67);
        assert_eq!(to_fixed(1.3333333333333333, 2), 1.33);
    }

    #[test]
    fn test_to_fixed_zero_precision() {
        assert_eq!(to_fixed(4.5, 0), 5.0);
        assert_eq!(to_fixed(4.49, 0), 4.0);
    }

    #[test]
    fn test_huge_precision_does_not_overflow() {
        assert!(to_fixed(13.3, i32::MAX as u32).is_nan());
        assert!(to_fixed(13.3, u32::MAX).is_nan());
        assert_eq!(converter(i32::MAX as u32).convert(100.0).as_deref(), Some("NaNvw"));
    }

    #[test]
    fn test_format_drops_trailing_zero() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_convert_default_precision() {
        assert_eq!(converter(5).convert(100.0).as_deref(), Some("13.33333vw"));
    }

    #[test]
    fn test_convert_precision_two() {
        assert_eq!(converter(2).convert(10.0).as_deref(), Some("1.33vw"));
        assert_eq!(converter(2).convert(20.0).as_deref(), Some("2.67vw"));
        assert_eq!(converter(2).convert(375.0).as_deref(), Some("50vw"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let converter = converter(5);
        assert_eq!(converter.convert(1.0), None);
        assert_eq!(converter.convert(0.0), None);
        assert!(converter.convert(2.0).is_some());
    }

    #[test]
    fn test_custom_unit_suffix() {
        let converter = Converter {
            viewport_size: 375.0,
            precision: 3,
            min_pixel_value: 0.0,
            unit: "vmin".to_string(),
        };
        assert_eq!(converter.convert(30.0).as_deref(), Some("8vmin"));
    }

    #[test]
    fn test_every_converted_value_ends_with_unit() {
        let converter = converter(2);
        for pixels in 2..=1500 {
            let out = converter.convert(f64::from(pixels)).unwrap();
            assert!(out.ends_with("vw"), "{pixels}px -> {out}");
            let number: f64 = out.trim_end_matches("vw").parse().unwrap();
            let expected = to_fixed(f64::from(pixels) / 750.0 * 100.0, 2);
            assert_eq!(number, expected);
        }
    }
}
