//! Military Grid Reference System
//!
//! References are written without spaces at 1 m precision, e.g.
//! `31NAA6602100000`: zone, latitude band, 100 km square, then five easting
//! and five northing digits (truncated). Latitudes above 84°N or below 80°S
//! use the UPS polar grids (bands A/B south, Y/Z north).

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::grid::transformer::{GridPoint, Hemisphere, Transformer};
use crate::grid::GridReferenceCodec;

const BAND_LETTERS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";
const COLUMN_SETS: [&[u8]; 3] = [b"ABCDEFGH", b"JKLMNPQR", b"STUVWXYZ"];
const ROW_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUV";

const UPS_WEST_COLUMNS: &[u8] = b"JKLPQRSTUXYZ";
const UPS_EAST_COLUMNS: &[u8] = b"ABCFGHJKLPQR";
const UPS_NORTH_ROWS: &[u8] = b"ABCDEFGHJKLMNP";
const UPS_SOUTH_ROWS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

const SQUARE: f64 = 100_000.0;
const NORTHING_CYCLE: f64 = 2_000_000.0;
const MAX_DIGITS: usize = 5;

/// MGRS encoder and decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct Mgrs;

impl GridReferenceCodec for Mgrs {
    fn name(&self) -> &'static str {
        "MGRS"
    }

    fn encode(&self, latitude: f64, longitude: f64) -> Result<String> {
        if !(-80.0..=84.0).contains(&latitude) {
            return encode_ups(latitude, longitude);
        }

        let zone = utm_zone(latitude, longitude);
        let point = snap(Transformer::utm(zone, Hemisphere::of(latitude))?.forward(latitude, longitude)?);

        let band = BAND_LETTERS[(((latitude + 80.0) / 8.0).floor() as usize).min(BAND_LETTERS.len() - 1)];
        let columns = COLUMN_SETS[(zone as usize - 1) % 3];
        let column = columns[square_index(point.easting, 0.0).saturating_sub(1).min(columns.len() - 1)];
        let row = ROW_LETTERS[(square_index(point.northing, 0.0) + row_offset(zone)) % ROW_LETTERS.len()];

        Ok(format!(
            "{}{}{}{}{}",
            zone,
            band as char,
            column as char,
            row as char,
            digits(point.easting, point.northing)
        ))
    }

    fn decode(&self, reference: &str) -> Result<Coordinate> {
        let reference: String = reference
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let zone_len = reference
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(reference.len());
        let (zone, rest) = reference.split_at(zone_len);
        let rest = rest.as_bytes();

        if rest.len() < 3 || !rest[..3].iter().all(u8::is_ascii_uppercase) {
            return Err(invalid(&reference, "expected band and 100 km square letters"));
        }
        let (easting, northing) = parse_digits(&reference, &rest[3..])?;

        if zone.is_empty() {
            decode_ups(&reference, rest[0], rest[1], rest[2], easting, northing)
        } else {
            let zone: u8 = zone
                .parse()
                .ok()
                .filter(|zone| (1..=60).contains(zone))
                .ok_or_else(|| invalid(&reference, "zone must be 1 to 60"))?;
            decode_utm(&reference, zone, rest[0], rest[1], rest[2], easting, northing)
        }
    }
}

/// Returns the UTM zone for a point, including the Norway and Svalbard exceptions
pub fn utm_zone(latitude: f64, longitude: f64) -> u8 {
    let mut zone = (((longitude + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60);

    if (56.0..64.0).contains(&latitude) && (3.0..12.0).contains(&longitude) {
        zone = 32;
    }

    if (72.0..=84.0).contains(&latitude) && (0.0..42.0).contains(&longitude) {
        zone = match longitude {
            lon if lon < 9.0 => 31,
            lon if lon < 21.0 => 33,
            lon if lon < 33.0 => 35,
            _ => 37,
        };
    }

    zone as u8
}

/// Longitude of the central meridian of a zone
pub fn central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
}

/// Rounds away sub-micrometre noise so grid lines and poles truncate cleanly
fn snap(point: GridPoint) -> GridPoint {
    let round = |metres: f64| (metres * 1e6).round() / 1e6;
    GridPoint {
        easting: round(point.easting),
        northing: round(point.northing),
    }
}

fn invalid(reference: &str, reason: &str) -> Error {
    Error::InvalidGridReference(format!("MGRS {:?}: {}", reference, reason))
}

fn square_index(value: f64, origin: f64) -> usize {
    ((value - origin) / SQUARE).floor().max(0.0) as usize
}

/// Row letters restart at F in even zones
fn row_offset(zone: u8) -> usize {
    if zone % 2 == 0 {
        5
    } else {
        0
    }
}

fn digits(easting: f64, northing: f64) -> String {
    format!(
        "{:05}{:05}",
        (easting.rem_euclid(SQUARE).floor() as u32).min(99_999),
        (northing.rem_euclid(SQUARE).floor() as u32).min(99_999)
    )
}

/// Splits the numeric tail into easting and northing metres within the square
fn parse_digits(reference: &str, tail: &[u8]) -> Result<(f64, f64)> {
    if tail.len() % 2 != 0 || tail.len() > 2 * MAX_DIGITS || !tail.iter().all(u8::is_ascii_digit) {
        return Err(invalid(reference, "expected an even number of up to 10 digits"));
    }

    let half = tail.len() / 2;
    let scale = 10f64.powi((MAX_DIGITS - half) as i32);
    let value = |digits: &[u8]| {
        digits
            .iter()
            .fold(0.0, |acc, digit| acc * 10.0 + (digit - b'0') as f64)
            * scale
    };

    Ok((value(&tail[..half]), value(&tail[half..])))
}

fn position(letters: &[u8], letter: u8) -> Option<usize> {
    letters.iter().position(|&candidate| candidate == letter)
}

fn decode_utm(
    reference: &str,
    zone: u8,
    band: u8,
    column: u8,
    row: u8,
    easting: f64,
    northing: f64,
) -> Result<Coordinate> {
    let band_index = position(BAND_LETTERS, band).ok_or_else(|| invalid(reference, "unknown latitude band"))?;
    let column_index = position(COLUMN_SETS[(zone as usize - 1) % 3], column)
        .ok_or_else(|| invalid(reference, "column letter not used in this zone"))?;
    let row_index = position(ROW_LETTERS, row).ok_or_else(|| invalid(reference, "unknown row letter"))?;

    let hemisphere = if band < b'N' {
        Hemisphere::South
    } else {
        Hemisphere::North
    };
    let transformer = Transformer::utm(zone, hemisphere)?;

    let band_latitude = band_index as f64 * 8.0 - 80.0;
    let band_northing = snap(transformer.forward(band_latitude, central_meridian(zone))?).northing;
    let band_floor = (band_northing / SQUARE).floor() * SQUARE;

    let row_value = ((row_index + ROW_LETTERS.len() - row_offset(zone)) % ROW_LETTERS.len()) as f64;
    let mut full_northing = row_value * SQUARE + northing;
    while full_northing < band_floor {
        full_northing += NORTHING_CYCLE;
    }

    let (latitude, longitude) = transformer.inverse(GridPoint {
        easting: (column_index + 1) as f64 * SQUARE + easting,
        northing: full_northing,
    })?;

    Coordinate::new(latitude, wrap_longitude(longitude))
}

fn wrap_longitude(longitude: f64) -> f64 {
    if longitude > 180.0 {
        longitude - 360.0
    } else if longitude < -180.0 {
        longitude + 360.0
    } else {
        longitude
    }
}

/// Column letters and false easting for the UPS half-grid east or west of the 0/180 meridian
fn ups_columns(east: bool) -> (&'static [u8], f64) {
    if east {
        (UPS_EAST_COLUMNS, 2_000_000.0)
    } else {
        (UPS_WEST_COLUMNS, 800_000.0)
    }
}

/// Row letters and false northing for the UPS grid of a hemisphere
fn ups_rows(hemisphere: Hemisphere) -> (&'static [u8], f64) {
    match hemisphere {
        Hemisphere::North => (UPS_NORTH_ROWS, 1_300_000.0),
        Hemisphere::South => (UPS_SOUTH_ROWS, 800_000.0),
    }
}

fn encode_ups(latitude: f64, longitude: f64) -> Result<String> {
    let hemisphere = Hemisphere::of(latitude);
    let point = snap(Transformer::ups(hemisphere)?.forward(latitude, longitude)?);
    let east = point.easting >= 2_000_000.0;

    let zone = match (hemisphere, east) {
        (Hemisphere::North, false) => 'Y',
        (Hemisphere::North, true) => 'Z',
        (Hemisphere::South, false) => 'A',
        (Hemisphere::South, true) => 'B',
    };

    let (columns, false_easting) = ups_columns(east);
    let (rows, false_northing) = ups_rows(hemisphere);
    let column = columns[square_index(point.easting, false_easting).min(columns.len() - 1)];
    let row = rows[square_index(point.northing, false_northing).min(rows.len() - 1)];

    Ok(format!(
        "{}{}{}{}",
        zone,
        column as char,
        row as char,
        digits(point.easting, point.northing)
    ))
}

fn decode_ups(
    reference: &str,
    zone: u8,
    column: u8,
    row: u8,
    easting: f64,
    northing: f64,
) -> Result<Coordinate> {
    let (hemisphere, east) = match zone {
        b'A' => (Hemisphere::South, false),
        b'B' => (Hemisphere::South, true),
        b'Y' => (Hemisphere::North, false),
        b'Z' => (Hemisphere::North, true),
        _ => return Err(invalid(reference, "polar zone must be A, B, Y or Z")),
    };

    let (columns, false_easting) = ups_columns(east);
    let (rows, false_northing) = ups_rows(hemisphere);
    let column_index = position(columns, column).ok_or_else(|| invalid(reference, "unknown polar column letter"))?;
    let row_index = position(rows, row).ok_or_else(|| invalid(reference, "unknown polar row letter"))?;

    let (latitude, longitude) = Transformer::ups(hemisphere)?.inverse(GridPoint {
        easting: false_easting + column_index as f64 * SQUARE + easting,
        northing: false_northing + row_index as f64 * SQUARE + northing,
    })?;

    Coordinate::new(latitude.clamp(-90.0, 90.0), longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(latitude: f64, longitude: f64) -> Coordinate {
        let reference = Mgrs.encode(latitude, longitude).unwrap();
        Mgrs.decode(&reference).unwrap()
    }

    /// Longitude error scaled to ground distance so high latitudes compare fairly
    fn within(coord: &Coordinate, latitude: f64, longitude: f64, tolerance: f64) -> bool {
        (coord.latitude() - latitude).abs() < tolerance
            && (coord.longitude() - longitude).abs() * latitude.to_radians().cos() < tolerance
    }

    #[test]
    fn test_encode_origin() {
        assert_eq!(Mgrs.encode(0.0, 0.0).unwrap(), "31NAA6602100000");
    }

    #[test]
    fn test_encode_poles() {
        assert_eq!(Mgrs.encode(90.0, 0.0).unwrap(), "ZAH0000000000");
        assert_eq!(Mgrs.encode(-90.0, 0.0).unwrap(), "BAN0000000000");
    }

    #[test]
    fn test_utm_zone() {
        assert_eq!(utm_zone(0.0, 0.0), 31);
        assert_eq!(utm_zone(0.0, -180.0), 1);
        assert_eq!(utm_zone(0.0, 180.0), 60);
        assert_eq!(utm_zone(60.0, 5.0), 32);
        assert_eq!(utm_zone(78.0, 15.0), 33);
        assert_eq!(central_meridian(31), 3.0);
    }

    #[test]
    fn test_snap_keeps_grid_lines() {
        let point = snap(GridPoint {
            easting: 1_999_999.999_999_9,
            northing: 100_000.000_000_1,
        });
        assert_eq!(digits(point.easting, point.northing), "0000000000");
    }

    #[test]
    fn test_decode_origin() {
        let coord = Mgrs.decode("31N AA 66021 00000").unwrap();
        assert!(coord.latitude().abs() < 1e-5);
        assert!(coord.longitude().abs() < 1e-5);
    }

    #[test]
    fn test_round_trip_within_a_metre_or_two() {
        let tolerance = 2e-5;
        for (lat, lon) in [
            (47.6062, -122.3321),
            (-33.8688, 151.2093),
            (60.0, 5.0),
            (78.2232, 15.6267),
            (-79.9, -60.0),
            (83.9, 30.0),
        ] {
            let coord = round_trip(lat, lon);
            assert!(
                within(&coord, lat, lon, tolerance),
                "{} {} -> {:?} via {}",
                lat,
                lon,
                coord,
                Mgrs.encode(lat, lon).unwrap()
            );
        }
    }

    #[test]
    fn test_polar_round_trip() {
        for (lat, lon) in [(85.0, 45.0), (88.0, -100.0), (-81.0, 10.0), (-85.5, -170.0)] {
            let coord = round_trip(lat, lon);
            assert!(within(&coord, lat, lon, 2e-5), "{} {} -> {:?}", lat, lon, coord);
        }
    }

    #[test]
    fn test_decode_lower_precision() {
        let coord = Mgrs.decode("31NAA61").unwrap();
        let full = Mgrs.decode("31NAA6000010000").unwrap();
        assert!(coord.approx_eq(&full, 1e-9));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(Mgrs.decode("61NAA00"), Err(Error::InvalidGridReference(_))));
        assert!(matches!(Mgrs.decode("31NAA123"), Err(Error::InvalidGridReference(_))));
        assert!(matches!(Mgrs.decode("31NIA00"), Err(Error::InvalidGridReference(_))));
        assert!(matches!(Mgrs.decode("31N"), Err(Error::InvalidGridReference(_))));
        assert!(matches!(Mgrs.decode("45.5N"), Err(Error::InvalidGridReference(_))));
    }
}
