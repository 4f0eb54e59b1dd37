//! Global Area Reference System
//!
//! A reference is a three digit longitude band (`001` to `720`, 30' wide from
//! 180°W), two latitude letters (`AA` to `QZ`, 30' tall from 90°S), an
//! optional 15' quadrant digit and an optional 5' keypad digit.

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::grid::GridReferenceCodec;

const LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Cells of five minutes per degree
const FIVE_MINUTE_CELLS: f64 = 12.0;
const LONGITUDE_CELLS: i64 = 360 * 12;
const LATITUDE_CELLS: i64 = 180 * 12;
const LATITUDE_BANDS: usize = 360;

/// GARS encoder and decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct Gars;

impl GridReferenceCodec for Gars {
    fn name(&self) -> &'static str {
        "GARS"
    }

    fn encode(&self, latitude: f64, longitude: f64) -> Result<String> {
        let lon_cell = (((longitude + 180.0) * FIVE_MINUTE_CELLS).floor() as i64).clamp(0, LONGITUDE_CELLS - 1);
        let lat_cell = (((latitude + 90.0) * FIVE_MINUTE_CELLS).floor() as i64).clamp(0, LATITUDE_CELLS - 1);

        let band = (lon_cell / 6) as usize;
        let lat_band = (lat_cell / 6) as usize;

        let (quad_col, quad_row) = ((lon_cell % 6) / 3, (lat_cell % 6) / 3);
        let quadrant = match (quad_col, quad_row) {
            (0, 1) => 1,
            (1, 1) => 2,
            (0, _) => 3,
            _ => 4,
        };
        let keypad = (2 - lat_cell % 3) * 3 + lon_cell % 3 + 1;

        Ok(format!(
            "{:03}{}{}{}{}",
            band + 1,
            LETTERS[lat_band / LETTERS.len()] as char,
            LETTERS[lat_band % LETTERS.len()] as char,
            quadrant,
            keypad
        ))
    }

    fn decode(&self, reference: &str) -> Result<Coordinate> {
        let reference: String = reference
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let bytes = reference.as_bytes();

        if !(5..=7).contains(&bytes.len()) || !bytes[..3].iter().all(u8::is_ascii_digit) {
            return Err(invalid(&reference, "expected three digits, two letters and up to two digits"));
        }

        let band = bytes[..3]
            .iter()
            .fold(0usize, |acc, digit| acc * 10 + (digit - b'0') as usize);
        if !(1..=720).contains(&band) {
            return Err(invalid(&reference, "longitude band must be 001 to 720"));
        }

        let letter = |byte: u8| LETTERS.iter().position(|&candidate| candidate == byte);
        let lat_band = match (letter(bytes[3]), letter(bytes[4])) {
            (Some(first), Some(second)) => first * LETTERS.len() + second,
            _ => return Err(invalid(&reference, "latitude letters must be A to Z without I and O")),
        };
        if lat_band >= LATITUDE_BANDS {
            return Err(invalid(&reference, "latitude band beyond QZ"));
        }

        let mut longitude = -180.0 + (band - 1) as f64 * 0.5;
        let mut latitude = -90.0 + lat_band as f64 * 0.5;

        if let Some(&quadrant) = bytes.get(5) {
            let (col, row) = match quadrant {
                b'1' => (0, 1),
                b'2' => (1, 1),
                b'3' => (0, 0),
                b'4' => (1, 0),
                _ => return Err(invalid(&reference, "quadrant must be 1 to 4")),
            };
            longitude += col as f64 * 0.25;
            latitude += row as f64 * 0.25;
        }

        if let Some(&keypad) = bytes.get(6) {
            if !(b'1'..=b'9').contains(&keypad) {
                return Err(invalid(&reference, "keypad must be 1 to 9"));
            }
            let index = (keypad - b'1') as u32;
            longitude += (index % 3) as f64 / FIVE_MINUTE_CELLS;
            latitude += (2 - index / 3) as f64 / FIVE_MINUTE_CELLS;
        }

        Coordinate::new(latitude, longitude)
    }
}

fn invalid(reference: &str, reason: &str) -> Error {
    Error::InvalidGridReference(format!("GARS {:?}: {}", reference, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(Gars.encode(0.0, 0.0).unwrap(), "361HN37");
        assert_eq!(Gars.encode(-90.0, -180.0).unwrap(), "001AA37");
        assert_eq!(Gars.encode(90.0, 180.0).unwrap(), "720QZ23");
    }

    #[test]
    fn test_encode_known_cell() {
        // 38°56.4'N 77°04.2'W: band 206, row LT, upper right quadrant, top right key
        assert_eq!(Gars.encode(38.94, -77.07).unwrap(), "206LT23");
    }

    #[test]
    fn test_decode_returns_south_west_corner() {
        let coord = Gars.decode("361HN37").unwrap();
        assert_eq!((coord.latitude(), coord.longitude()), (0.0, 0.0));

        let coord = Gars.decode("001aa").unwrap();
        assert_eq!((coord.latitude(), coord.longitude()), (-90.0, -180.0));

        let coord = Gars.decode("361HN1").unwrap();
        assert_eq!((coord.latitude(), coord.longitude()), (0.25, 0.0));
    }

    #[test]
    fn test_round_trip_lands_in_cell() {
        for (lat, lon) in [(38.94, -77.07), (-33.8688, 151.2093), (51.4779, -0.0015), (0.1, 179.9)] {
            let coord = Gars.decode(&Gars.encode(lat, lon).unwrap()).unwrap();
            assert!(coord.latitude() <= lat && lat - coord.latitude() < 1.0 / 12.0, "{} {:?}", lat, coord);
            assert!(coord.longitude() <= lon && lon - coord.longitude() < 1.0 / 12.0, "{} {:?}", lon, coord);
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for reference in ["36HN", "721AA", "000AA", "361HI", "361RA", "361HN5", "361HN30", "361HN371"] {
            assert!(
                matches!(Gars.decode(reference), Err(Error::InvalidGridReference(_))),
                "{}",
                reference
            );
        }
    }
}
