//! Permissive parsing for text the combined parser cannot split

use tracing::debug;

use crate::coordinate::point::Coordinate;
use crate::coordinate::split::is_plain_decimal;
use crate::error::{Error, Result};
use crate::types::{AxisType, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Degrees,
    Minutes,
    Seconds,
}

impl Unit {
    fn from_glyph(c: char) -> Option<Self> {
        match c {
            '°' | 'º' | '˚' => Some(Unit::Degrees),
            '\'' | '′' | '’' => Some(Unit::Minutes),
            '"' | '″' | '”' => Some(Unit::Seconds),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number {
        value: f64,
        negative: bool,
        fractional: bool,
    },
    Unit(Unit),
    Direction(Direction),
}

fn starts_number(chars: &[char], at: usize) -> bool {
    match chars.get(at) {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.get(at + 1).is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Reads `digits[.digits]` starting at `start`; returns the value, whether it
/// had a fraction, and the index after it
fn read_number(chars: &[char], start: usize) -> (Option<f64>, bool, usize) {
    let mut end = start;
    while chars.get(end).is_some_and(|c| c.is_ascii_digit()) {
        end += 1;
    }

    let fractional = chars.get(end) == Some(&'.') && chars.get(end + 1).is_some_and(|c| c.is_ascii_digit());
    if fractional {
        end += 1;
        while chars.get(end).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
        }
    }

    let literal: String = chars[start..end].iter().collect();
    (literal.parse::<f64>().ok(), fractional, end)
}

/// Splits text into numbers, unit glyphs and direction words in one pass
fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let is_sign = (c == '-' || c == '+')
            && starts_number(&chars, i + 1)
            && (i == 0 || !chars[i - 1].is_alphanumeric());

        if starts_number(&chars, i) || is_sign {
            let start = if is_sign { i + 1 } else { i };
            let (value, fractional, end) = read_number(&chars, start);
            if let Some(value) = value {
                tokens.push(Token::Number {
                    value,
                    negative: is_sign && c == '-',
                    fractional,
                });
            }
            i = end;
        } else if c.is_alphabetic() {
            let start = i;
            while chars.get(i).is_some_and(|c| c.is_alphabetic()) {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if let Some(direction) = Direction::from_word(&word) {
                tokens.push(Token::Direction(direction));
            }
        } else {
            if let Some(unit) = Unit::from_glyph(c) {
                tokens.push(Token::Unit(unit));
            }
            i += 1;
        }
    }

    tokens
}

/// Degrees with optional minutes and seconds for one axis
#[derive(Debug)]
struct Group {
    components: Vec<f64>,
    negative: bool,
    closed: bool,
    direction: Option<Direction>,
}

impl Group {
    fn start(value: f64, negative: bool, direction: Option<Direction>) -> Self {
        Self {
            components: vec![value],
            negative,
            closed: false,
            direction,
        }
    }

    /// Whether the number can continue this group as minutes or seconds
    fn accepts(&self, value: f64, negative: bool, unit: Option<Unit>) -> bool {
        !self.closed
            && !negative
            && unit != Some(Unit::Degrees)
            && value < 60.0
            && self.components.len() < 3
    }

    /// Signed decimal degrees, rejecting a direction letter of the wrong axis
    fn value(&self, axis: AxisType) -> Result<f64> {
        if let Some(direction) = self.direction.filter(|d| !axis.accepts(*d)) {
            return Err(Error::MalformedInput(format!(
                "direction {} cannot mark the {}",
                direction,
                axis.name()
            )));
        }

        let magnitude: f64 = self
            .components
            .iter()
            .zip([1.0, 60.0, 3600.0])
            .map(|(component, divisor)| component / divisor)
            .sum();

        if self.negative || self.direction.is_some_and(|d| d.is_negative()) {
            Ok(-magnitude)
        } else {
            Ok(magnitude)
        }
    }
}

/// Falls back to looser parsing strategies when combined splitting fails
pub struct FreeTextFallbackParser;

impl FreeTextFallbackParser {
    /// Tries the plain decimal pair, then the token scan
    pub fn parse(text: &str) -> Result<Coordinate> {
        match Self::parse_decimal_pair(text) {
            Ok(coordinate) => return Ok(coordinate),
            Err(e) if e.is_terminal() => return Err(e),
            Err(e) => debug!(error = %e, "decimal pair rejected, scanning tokens"),
        }

        Self::parse_tokens(text)
    }

    /// Parses `lat, lon` as two bare decimal numbers
    pub fn parse_decimal_pair(text: &str) -> Result<Coordinate> {
        let mut halves = text.split(',');
        let (latitude, longitude) = match (halves.next(), halves.next(), halves.next()) {
            (Some(latitude), Some(longitude), None) => (latitude.trim(), longitude.trim()),
            _ => {
                return Err(Error::MalformedInput(format!(
                    "{:?} is not a comma-separated pair",
                    text
                )))
            }
        };

        let parse = |half: &str, axis: AxisType| {
            is_plain_decimal(half)
                .then(|| half.parse::<f64>().ok())
                .flatten()
                .ok_or_else(|| {
                    Error::MalformedInput(format!("{} {:?} is not a decimal number", axis.name(), half))
                })
        };

        Coordinate::new(
            parse(latitude, AxisType::Latitude)?,
            parse(longitude, AxisType::Longitude)?,
        )
    }

    /// Greedily groups numbers into a latitude and a longitude
    ///
    /// A group is degrees with optional minutes and seconds. It ends at a
    /// direction letter, at a fractional component, after seconds, or when
    /// the next number cannot be minutes or seconds (60 or more, signed, or
    /// marked with a degree sign). A direction letter belongs to the group it
    /// follows, or to the next group when the current one already has one.
    /// The first group is the latitude, the second the longitude, and each
    /// letter must suit its group's axis.
    pub fn parse_tokens(text: &str) -> Result<Coordinate> {
        let tokens = tokenize(text);
        let mut groups: Vec<Group> = Vec::new();
        let mut current: Option<Group> = None;
        let mut pending: Option<Direction> = None;

        let mut iter = tokens.iter().peekable();
        while let Some(token) = iter.next() {
            match *token {
                Token::Number {
                    value,
                    negative,
                    fractional,
                } => {
                    let unit = match iter.peek() {
                        Some(Token::Unit(unit)) => {
                            let unit = *unit;
                            iter.next();
                            Some(unit)
                        }
                        _ => None,
                    };

                    match current.as_mut() {
                        Some(group) if group.accepts(value, negative, unit) => {
                            group.components.push(value)
                        }
                        _ => {
                            groups.extend(current.take());
                            current = Some(Group::start(value, negative, pending.take()));
                        }
                    }

                    if let Some(group) = current.as_mut() {
                        group.closed = fractional || group.components.len() == 3;
                    }
                }
                Token::Direction(direction) => match current.as_mut() {
                    Some(group) if group.direction.is_none() => {
                        group.direction = Some(direction);
                        group.closed = true;
                    }
                    _ if pending.is_some() => {
                        return Err(Error::MalformedInput(format!(
                            "consecutive direction letters in {:?}",
                            text
                        )))
                    }
                    _ => {
                        if let Some(group) = current.as_mut() {
                            group.closed = true;
                        }
                        pending = Some(direction);
                    }
                },
                Token::Unit(_) => {}
            }
        }
        groups.extend(current);

        if let Some(direction) = pending {
            return Err(Error::MalformedInput(format!(
                "direction {} in {:?} is not attached to a number",
                direction, text
            )));
        }

        match groups.as_slice() {
            [latitude, longitude] => {
                debug!(?latitude, ?longitude, "token scan found both axes");
                Coordinate::new(
                    latitude.value(AxisType::Latitude)?,
                    longitude.value(AxisType::Longitude)?,
                )
            }
            _ => Err(Error::MalformedInput(format!(
                "expected a latitude and a longitude in {:?}, found {} numeric groups",
                text,
                groups.len()
            ))),
        }
    }
}
