//! Single-axis degrees/minutes/seconds values and their text parser
//!
//! An [`AxisValue`] is produced either by [`AxisValue::parse`] or by converting a
//! decimal value, and always satisfies the axis invariants:
//!
//! - degrees within `0..=90` (latitude) or `0..=180` (longitude)
//! - minutes and seconds within `0..=59`
//! - minutes and seconds both zero when degrees sit at the axis maximum
//! - a direction letter legal for the axis
//!
//! Accepted text ranges from compact `453015N` and `1223030W` through
//! separated `45°30'15"N`, `N 45 30 15` and `12-15.16N` to bare decimal
//! degrees with a sign (`-122.5`, when the caller asks for the sign to carry
//! the direction).

use std::fmt;

use crate::error::{Error, Result};
use crate::types::{AxisType, Direction};

/// Degrees, minutes, seconds and direction for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisValue {
    degrees: u32,
    minutes: u32,
    seconds: u32,
    direction: Direction,
}

impl AxisValue {
    /// Creates a validated axis value
    pub fn new(degrees: u32, minutes: u32, seconds: u32, direction: Direction) -> Result<Self> {
        let axis = direction.axis();
        let max = axis.max_degrees();

        if degrees > max {
            return Err(Error::OutOfRange(format!(
                "{} degrees {} exceed {}",
                axis.name(),
                degrees,
                max
            )));
        }
        if minutes > 59 || seconds > 59 {
            return Err(Error::OutOfRange(format!(
                "{} minutes/seconds {}'{}\" exceed 59",
                axis.name(),
                minutes,
                seconds
            )));
        }
        if degrees == max && (minutes != 0 || seconds != 0) {
            return Err(Error::OutOfRange(format!(
                "{} {}°{}'{}\" is beyond {}°",
                axis.name(),
                degrees,
                minutes,
                seconds,
                max
            )));
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
            direction,
        })
    }

    /// Builds a value whose invariants the caller has already established
    pub(crate) fn from_parts_unchecked(
        degrees: u32,
        minutes: u32,
        seconds: u32,
        direction: Direction,
    ) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
            direction,
        }
    }

    /// Parses a text fragment holding a single axis
    ///
    /// With `force_direction_from_sign` the direction comes from an optional
    /// leading `-` instead of a direction letter, and text that names any
    /// direction is rejected.
    pub fn parse(text: &str, axis: AxisType, force_direction_from_sign: bool) -> Result<Self> {
        if force_direction_from_sign {
            if let Some(direction) = named_directions(text).next() {
                return Err(Error::MalformedInput(format!(
                    "{} {:?} takes its sign from '-' but names direction {}",
                    axis.name(),
                    text,
                    direction
                )));
            }
        }

        let kept = retain_axis_characters(text, axis);
        let kept = kept.trim();

        if kept.is_empty() {
            return Err(Error::MalformedInput(format!(
                "no {} content in {:?}",
                axis.name(),
                text
            )));
        }

        let (direction, body) = if force_direction_from_sign {
            match kept.strip_prefix('-') {
                Some(rest) => (axis.negative(), rest),
                None => (axis.positive(), kept),
            }
        } else {
            split_direction(kept).ok_or_else(|| {
                Error::MalformedInput(format!("no {} direction letter in {:?}", axis.name(), text))
            })?
        };

        let fields = split_fields(body)?;
        let parts = match fields.len() {
            0 => {
                return Err(Error::MalformedInput(format!(
                    "no {} digits in {:?}",
                    axis.name(),
                    text
                )))
            }
            1 => RawParts::compact(&fields[0], axis)?,
            2 | 3 => RawParts::separated(&fields)?,
            n => {
                return Err(Error::MalformedInput(format!(
                    "{} numeric fields in {} {:?}",
                    n,
                    axis.name(),
                    text
                )))
            }
        };

        parts.resolve(direction)
    }

    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the axis this value belongs to
    pub fn axis(&self) -> AxisType {
        self.direction.axis()
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}° {:02}' {:02}\" {}",
            self.degrees, self.minutes, self.seconds, self.direction
        )
    }
}

/// Keeps digits, `.`, `-` and the axis direction letters; everything else
/// becomes a space so field boundaries survive.
/// Direction letters and words standing on their own, like `W` in `10W`
fn named_directions(text: &str) -> impl Iterator<Item = Direction> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter_map(Direction::from_word)
}

fn retain_axis_characters(text: &str, axis: AxisType) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .map(|c| {
            let legal_letter = Direction::from_letter(c).is_some_and(|d| axis.accepts(d));
            if c.is_ascii_digit() || c == '.' || c == '-' || legal_letter {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Takes the direction from the last character, else from the first.
fn split_direction(kept: &str) -> Option<(Direction, &str)> {
    let last = kept.chars().last()?;
    if let Some(direction) = Direction::from_letter(last) {
        return Some((direction, &kept[..kept.len() - last.len_utf8()]));
    }

    let first = kept.chars().next()?;
    Direction::from_letter(first).map(|direction| (direction, &kept[first.len_utf8()..]))
}

/// A run of digits with an optional fractional part
#[derive(Debug, PartialEq, Eq)]
struct Field<'a> {
    int: &'a str,
    frac: Option<&'a str>,
}

fn split_fields(body: &str) -> Result<Vec<Field<'_>>> {
    body.split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut pieces = token.split('.');
            let int = pieces.next().unwrap_or("");
            let frac = pieces.next().filter(|frac| !frac.is_empty());

            if pieces.next().is_some() {
                return Err(Error::MalformedInput(format!(
                    "more than one decimal point in {:?}",
                    token
                )));
            }
            if int.is_empty() && frac.is_none() {
                return Err(Error::MalformedInput(format!("no digits in {:?}", token)));
            }

            Ok(Field { int, frac })
        })
        .collect()
}

fn parse_digits(digits: &str, unit: &str) -> Result<u32> {
    if digits.is_empty() {
        return Ok(0);
    }

    digits
        .parse::<u32>()
        .map_err(|_| Error::OutOfRange(format!("{} value {} is too large", unit, digits)))
}

fn parse_fraction(frac: &str) -> Result<f64> {
    format!("0.{}", frac)
        .parse::<f64>()
        .map_err(|_| Error::MalformedInput(format!("invalid fraction .{}", frac)))
}

/// Components read from the text before fraction merging and validation
#[derive(Debug, PartialEq)]
struct RawParts {
    degrees: u32,
    minutes: Option<u32>,
    seconds: Option<u32>,
    fraction: f64,
}

impl RawParts {
    /// Reads `DD[D][MM[SS]]` from a single run of digits, least significant group first
    fn compact(field: &Field<'_>, axis: AxisType) -> Result<Self> {
        let digits = field.int;
        let width = axis.degree_width();

        let (degrees, minutes, seconds) = if digits.len() <= width {
            (digits, None, None)
        } else if digits.len() <= width + 2 {
            let (d, m) = digits.split_at(digits.len() - 2);
            (d, Some(m), None)
        } else {
            let (rest, s) = digits.split_at(digits.len() - 2);
            let (d, m) = rest.split_at(rest.len() - 2);
            (d, Some(m), Some(s))
        };

        Ok(Self {
            degrees: parse_digits(degrees, "degrees")?,
            minutes: minutes.map(|m| parse_digits(m, "minutes")).transpose()?,
            seconds: seconds.map(|s| parse_digits(s, "seconds")).transpose()?,
            fraction: field.frac.map(parse_fraction).transpose()?.unwrap_or(0.0),
        })
    }

    /// Reads degrees, minutes and seconds from separate fields; only the last may be fractional
    fn separated(fields: &[Field<'_>]) -> Result<Self> {
        let (last, leading) = fields
            .split_last()
            .ok_or_else(|| Error::MalformedInput("no numeric fields".to_string()))?;

        if let Some(field) = leading.iter().find(|field| field.frac.is_some()) {
            return Err(Error::MalformedInput(format!(
                "fractional value {}.{} before the last field",
                field.int,
                field.frac.unwrap_or_default()
            )));
        }

        let seconds = fields
            .get(2)
            .map(|field| parse_digits(field.int, "seconds"))
            .transpose()?;

        Ok(Self {
            degrees: parse_digits(fields[0].int, "degrees")?,
            minutes: parse_digits(fields[1].int, "minutes").map(Some)?,
            seconds,
            fraction: last.frac.map(parse_fraction).transpose()?.unwrap_or(0.0),
        })
    }

    /// Merges the fraction into the finest unit present, carries, then validates
    fn resolve(self, direction: Direction) -> Result<AxisValue> {
        for (value, unit) in [(self.minutes, "minutes"), (self.seconds, "seconds")] {
            if let Some(value) = value.filter(|v| *v >= 60) {
                return Err(Error::OutOfRange(format!("{} {} exceed 59", unit, value)));
            }
        }

        let (degrees, minutes, seconds) = match (self.minutes, self.seconds) {
            (None, None) => {
                let total_minutes = self.fraction * 60.0;
                let minutes = total_minutes.floor();
                let seconds = ((total_minutes - minutes) * 60.0).round();
                (self.degrees, minutes as u32, seconds as u32)
            }
            (Some(minutes), None) => {
                let seconds = (self.fraction * 60.0).round();
                (self.degrees, minutes, seconds as u32)
            }
            (Some(minutes), Some(seconds)) => {
                let seconds = (seconds as f64 + self.fraction).round();
                (self.degrees, minutes, seconds as u32)
            }
            (None, Some(_)) => {
                return Err(Error::MalformedInput("seconds without minutes".to_string()));
            }
        };

        let (degrees, minutes, seconds) = carry(degrees, minutes, seconds);
        AxisValue::new(degrees, minutes, seconds, direction)
    }
}

/// Rolls a seconds or minutes value of 60 into the next larger unit
pub(crate) fn carry(degrees: u32, minutes: u32, seconds: u32) -> (u32, u32, u32) {
    let (minutes, seconds) = if seconds >= 60 {
        (minutes + 1, seconds - 60)
    } else {
        (minutes, seconds)
    };

    if minutes >= 60 {
        (degrees.saturating_add(1), minutes - 60, seconds)
    } else {
        (degrees, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lat(text: &str) -> Result<AxisValue> {
        AxisValue::parse(text, AxisType::Latitude, false)
    }

    fn lon(text: &str) -> Result<AxisValue> {
        AxisValue::parse(text, AxisType::Longitude, false)
    }

    fn dms(value: &AxisValue) -> (u32, u32, u32, Direction) {
        (value.degrees(), value.minutes(), value.seconds(), value.direction())
    }

    #[test]
    fn test_parse_glyph_separated() {
        let value = lat("45°30'15\"N").unwrap();
        assert_eq!(dms(&value), (45, 30, 15, Direction::North));
    }

    #[test]
    fn test_parse_leading_direction() {
        let value = lon("W 122 10 05").unwrap();
        assert_eq!(dms(&value), (122, 10, 5, Direction::West));
    }

    #[test]
    fn test_parse_lowercase_direction() {
        let value = lat("33 52 s").unwrap();
        assert_eq!(dms(&value), (33, 52, 0, Direction::South));
    }

    #[test]
    fn test_parse_compact() {
        assert_eq!(dms(&lat("453015N").unwrap()), (45, 30, 15, Direction::North));
        assert_eq!(dms(&lon("1223030W").unwrap()), (122, 30, 30, Direction::West));
        assert_eq!(dms(&lat("4530N").unwrap()), (45, 30, 0, Direction::North));
        assert_eq!(dms(&lon("12215E").unwrap()), (122, 15, 0, Direction::East));
        assert_eq!(dms(&lat("45N").unwrap()), (45, 0, 0, Direction::North));
    }

    #[test]
    fn test_parse_decimal_degrees_fragment() {
        let value = lat("45.5N").unwrap();
        assert_eq!(dms(&value), (45, 30, 0, Direction::North));

        let value = lat("S 33.8688").unwrap();
        assert_eq!(dms(&value), (33, 52, 8, Direction::South));
    }

    #[test]
    fn test_parse_decimal_minutes() {
        let value = lat("12-15.16N").unwrap();
        assert_eq!(dms(&value), (12, 15, 10, Direction::North));

        let value = lon("071-57.30W").unwrap();
        assert_eq!(dms(&value), (71, 57, 18, Direction::West));
    }

    #[test]
    fn test_parse_decimal_seconds_rounding() {
        let value = lat("45 30 15.4 N").unwrap();
        assert_eq!(dms(&value), (45, 30, 15, Direction::North));

        let value = lat("45 30 15.5 N").unwrap();
        assert_eq!(dms(&value), (45, 30, 16, Direction::North));
    }

    #[test]
    fn test_parse_rounding_carries() {
        let value = lat("45 59 59.6 N").unwrap();
        assert_eq!(dms(&value), (46, 0, 0, Direction::North));
    }

    #[test]
    fn test_parse_direction_from_sign() {
        let value = AxisValue::parse("-122.5", AxisType::Longitude, true).unwrap();
        assert_eq!(dms(&value), (122, 30, 0, Direction::West));

        let value = AxisValue::parse("45°30'", AxisType::Latitude, true).unwrap();
        assert_eq!(dms(&value), (45, 30, 0, Direction::North));
    }

    #[test]
    fn test_parse_requires_direction() {
        assert!(matches!(lat("45 30 15"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_parse_rejects_letter_of_other_axis() {
        assert!(matches!(lat("45°30'15\"E"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_parse_signed_rejects_any_direction_letter() {
        for text in ["10W", "10 W", "20 south", "45°30' E", "1e1"] {
            assert!(
                matches!(
                    AxisValue::parse(text, AxisType::Latitude, true),
                    Err(Error::MalformedInput(_))
                ),
                "{}",
                text
            );
        }
        assert!(matches!(
            AxisValue::parse("5N", AxisType::Longitude, true),
            Err(Error::MalformedInput(_))
        ));

        let value = AxisValue::parse("45 deg 30", AxisType::Latitude, true).unwrap();
        assert_eq!(dms(&value), (45, 30, 0, Direction::North));
    }

    #[test]
    fn test_parse_rejects_empty_and_letter_only() {
        assert!(matches!(lat(""), Err(Error::MalformedInput(_))));
        assert!(matches!(lat("N"), Err(Error::MalformedInput(_))));
        assert!(matches!(lat("north"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        assert!(matches!(lat("1 2 3 4 N"), Err(Error::MalformedInput(_))));
        assert!(matches!(lat("12.34.56N"), Err(Error::MalformedInput(_))));
        assert!(matches!(lat("12.5 30 N"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_latitude_maximum_boundary() {
        assert_eq!(dms(&lat("900000N").unwrap()), (90, 0, 0, Direction::North));
        assert!(matches!(lat("900100N"), Err(Error::OutOfRange(_))));
        assert!(matches!(lat("90 01 00 S"), Err(Error::OutOfRange(_))));
        assert!(matches!(lat("91N"), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_longitude_maximum_boundary() {
        assert!(lon("180 00 00 W").is_ok());
        assert!(matches!(lon("180 00 01 W"), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_rejects_sixty_minutes_in_input() {
        assert!(matches!(lat("45 60 00 N"), Err(Error::OutOfRange(_))));
        assert!(matches!(lat("45 30 60 N"), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_new_validates() {
        assert!(AxisValue::new(90, 0, 0, Direction::North).is_ok());
        assert!(matches!(
            AxisValue::new(90, 1, 0, Direction::North),
            Err(Error::OutOfRange(_))
        ));
        assert!(matches!(
            AxisValue::new(10, 0, 60, Direction::East),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_display() {
        let value = AxisValue::new(7, 5, 9, Direction::South).unwrap();
        assert_eq!(value.to_string(), "7° 05' 09\" S");
    }

    #[test]
    fn test_carry() {
        assert_eq!(carry(10, 59, 60), (11, 0, 0));
        assert_eq!(carry(10, 20, 60), (10, 21, 0));
        assert_eq!(carry(10, 20, 30), (10, 20, 30));
    }
}
