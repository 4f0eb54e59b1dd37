//! Output notations and their formatters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinate::decimal::DecimalConverter;
use crate::coordinate::point::Coordinate;
use crate::error::{Error, Result};
use crate::grid::{Gars, GridReferenceCodec, Mgrs};
use crate::types::AxisType;

/// Notations a coordinate can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoordinateSystem {
    /// Signed decimal degrees, five places
    #[default]
    Wgs84,
    /// Degrees, minutes and whole seconds with a direction letter
    Dms,
    /// Military Grid Reference System at 1 m precision
    Mgrs,
    /// Global Area Reference System at 5' precision
    Gars,
}

impl CoordinateSystem {
    pub const ALL: [CoordinateSystem; 4] = [
        CoordinateSystem::Wgs84,
        CoordinateSystem::Dms,
        CoordinateSystem::Mgrs,
        CoordinateSystem::Gars,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CoordinateSystem::Wgs84 => "WGS84",
            CoordinateSystem::Dms => "DMS",
            CoordinateSystem::Mgrs => "MGRS",
            CoordinateSystem::Gars => "GARS",
        }
    }

    /// Returns the grid codec backing this notation, if it is a grid
    pub fn codec(&self) -> Option<&'static dyn GridReferenceCodec> {
        match self {
            CoordinateSystem::Mgrs => Some(&Mgrs),
            CoordinateSystem::Gars => Some(&Gars),
            CoordinateSystem::Wgs84 | CoordinateSystem::Dms => None,
        }
    }

    /// Writes a coordinate in this notation
    ///
    /// Only MGRS can fail, when PROJ cannot build or run the projection.
    pub fn format(&self, coordinate: &Coordinate) -> Result<String> {
        match self {
            CoordinateSystem::Wgs84 => Ok(format!(
                "{:.5}, {:.5}",
                coordinate.latitude(),
                coordinate.longitude()
            )),
            CoordinateSystem::Dms => Ok(format!(
                "{}, {}",
                DecimalConverter::split(coordinate.latitude(), AxisType::Latitude),
                DecimalConverter::split(coordinate.longitude(), AxisType::Longitude)
            )),
            CoordinateSystem::Mgrs => Mgrs.encode_coordinate(coordinate),
            CoordinateSystem::Gars => Gars.encode_coordinate(coordinate),
        }
    }

    /// Reads text written in this notation
    ///
    /// Decimal and DMS text share the free-text pipeline, so either is
    /// accepted for both. Grid notations go through their decoder.
    pub fn parse(&self, text: &str) -> Result<Coordinate> {
        match self.codec() {
            Some(codec) => codec.decode(text),
            None => crate::coordinate::parse(text),
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordinateSystem {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|system| system.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                Error::Unsupported(format!(
                    "coordinate system {:?}; expected one of WGS84, DMS, MGRS, GARS",
                    name
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    #[test]
    fn test_format_wgs84() {
        assert_eq!(CoordinateSystem::Wgs84.format(&coord(45.5, -122.5)).unwrap(), "45.50000, -122.50000");
    }

    #[test]
    fn test_format_dms() {
        assert_eq!(
            CoordinateSystem::Dms.format(&coord(-33.868_889, 151.209_167)).unwrap(),
            "33° 52' 08\" S, 151° 12' 33\" E"
        );
        assert_eq!(
            CoordinateSystem::Dms.format(&coord(45.999_999_999_722, 0.0)).unwrap(),
            "46° 00' 00\" N, 0° 00' 00\" E"
        );
    }

    #[test]
    fn test_format_grids() {
        assert_eq!(CoordinateSystem::Mgrs.format(&coord(0.0, 0.0)).unwrap(), "31NAA6602100000");
        assert_eq!(CoordinateSystem::Gars.format(&coord(0.0, 0.0)).unwrap(), "361HN37");
    }

    #[test]
    fn test_dms_round_trip() {
        for (lat, lon) in [(45.5, -122.5), (-33.8688, 151.2093), (89.999, 179.9999), (0.0001, -0.0001)] {
            let original = coord(lat, lon);
            let text = CoordinateSystem::Dms.format(&original).unwrap();
            let parsed = CoordinateSystem::Dms.parse(&text).unwrap();
            assert!(parsed.approx_eq(&original, 1.0 / 3600.0), "{} -> {:?}", text, parsed);
        }
    }

    #[test]
    fn test_wgs84_round_trip() {
        for (lat, lon) in [(45.5, -122.5), (-33.868_812, 151.209_34), (90.0, -180.0), (0.000_004, 0.000_006)] {
            let original = coord(lat, lon);
            let text = CoordinateSystem::Wgs84.format(&original).unwrap();
            let parsed = CoordinateSystem::Wgs84.parse(&text).unwrap();
            assert!(parsed.approx_eq(&original, 1e-5), "{} -> {:?}", text, parsed);
        }
    }

    #[test]
    fn test_grid_parse_uses_codec() {
        let parsed = CoordinateSystem::Gars.parse("361HN37").unwrap();
        assert_eq!((parsed.latitude(), parsed.longitude()), (0.0, 0.0));
        assert!(matches!(
            CoordinateSystem::Mgrs.parse("45.5, -122.5"),
            Err(Error::InvalidGridReference(_))
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("wgs84".parse::<CoordinateSystem>().unwrap(), CoordinateSystem::Wgs84);
        assert_eq!(" Mgrs ".parse::<CoordinateSystem>().unwrap(), CoordinateSystem::Mgrs);
        assert!(matches!("UTM".parse::<CoordinateSystem>(), Err(Error::Unsupported(_))));

        for system in CoordinateSystem::ALL {
            assert_eq!(system.to_string().parse::<CoordinateSystem>().unwrap(), system);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&CoordinateSystem::Dms).unwrap(), "\"DMS\"");
        let system: CoordinateSystem = serde_json::from_str("\"GARS\"").unwrap();
        assert_eq!(system, CoordinateSystem::Gars);
    }
}
