//! Coordinate parsing and formatting
//!
//! [`parse`] runs the text pipeline: the [`CombinedCoordinateParser`] first,
//! then the [`FreeTextFallbackParser`] when the combined parser fails for a
//! reason other than a range violation. [`parse_any`] also accepts MGRS and
//! GARS references.

pub mod axis;
pub mod decimal;
pub mod fallback;
pub mod point;
pub mod split;
pub mod system;

pub use axis::AxisValue;
pub use decimal::DecimalConverter;
pub use fallback::FreeTextFallbackParser;
pub use point::Coordinate;
pub use split::{CombinedCoordinateParser, SplitRule};
pub use system::CoordinateSystem;

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Gars, GridReferenceCodec, Mgrs};

/// Parses free-form decimal or DMS text into a coordinate
pub fn parse(text: &str) -> Result<Coordinate> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::MalformedInput("empty coordinate text".to_string()));
    }

    match CombinedCoordinateParser::parse(text) {
        Ok(coordinate) => Ok(coordinate),
        Err(e) if e.is_terminal() => Err(e),
        Err(e) => {
            debug!(error = %e, "combined parser rejected input, trying fallback");
            FreeTextFallbackParser::parse(text)
        }
    }
}

/// Parses text in any supported notation
///
/// Grid references are tried before the text pipeline. Neither grid grammar
/// overlaps decimal or DMS text, so the order only saves work.
pub fn parse_any(text: &str) -> Result<Coordinate> {
    for codec in [&Mgrs as &dyn GridReferenceCodec, &Gars] {
        if let Ok(coordinate) = codec.decode(text) {
            debug!(grid = codec.name(), "decoded grid reference");
            return Ok(coordinate);
        }
    }

    parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty_and_wordy_text() {
        assert!(matches!(parse(""), Err(Error::MalformedInput(_))));
        assert!(matches!(parse("   "), Err(Error::MalformedInput(_))));
        assert!(parse("north of nowhere").is_err());
    }

    #[test]
    fn test_parse_combined_examples() {
        let coord = parse("45.5, -122.5").unwrap();
        assert_eq!((coord.latitude(), coord.longitude()), (45.5, -122.5));

        let coord = parse("12-15.16N 071-57.30W").unwrap();
        assert!((coord.latitude() - 12.2527).abs() < 1e-3);
        assert!((coord.longitude() + 71.9550).abs() < 1e-3);
    }

    #[test]
    fn test_parse_falls_back_for_irregular_spacing() {
        assert!(CombinedCoordinateParser::parse("45.5   122 30 15 W").is_err());

        let coord = parse("45.5   122 30 15 W").unwrap();
        assert_eq!(coord.latitude(), 45.5);
        assert!((coord.longitude() + 122.504_166_7).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_missing_axis() {
        assert!(parse("45 30 N").is_err());
    }

    #[test]
    fn test_parse_rejects_direction_of_the_wrong_axis() {
        for text in ["10W, 20S", "10 W 20 S", "5E, 5N", "1e1, 2e1"] {
            assert!(
                matches!(parse(text), Err(Error::MalformedInput(_))),
                "{} -> {:?}",
                text,
                parse(text)
            );
        }
        assert!(parse_any("10W, 20S").is_err());
    }

    #[test]
    fn test_out_of_range_is_not_retried() {
        assert!(matches!(parse("90 01 00 N, 10 E"), Err(Error::OutOfRange(_))));
        assert!(matches!(parse("45.5, 181"), Err(Error::OutOfRange(_))));
        assert!(parse("90 00 00 N, 10 E").is_ok());
    }

    #[test]
    fn test_parse_any_accepts_grids_and_text() {
        let coord = parse_any("361HN37").unwrap();
        assert_eq!((coord.latitude(), coord.longitude()), (0.0, 0.0));

        let coord = parse_any("31N AA 66021 00000").unwrap();
        assert!(coord.approx_eq(&Coordinate::new(0.0, 0.0).unwrap(), 1e-5));

        let coord = parse_any("45.5, -122.5").unwrap();
        assert_eq!((coord.latitude(), coord.longitude()), (45.5, -122.5));
    }
}
