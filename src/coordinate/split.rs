//! Splitting a combined latitude/longitude string into its two axes
//!
//! The heuristics live in [`SplitRule`] and are tried in [`SplitRule::ORDER`];
//! the first rule that yields two non-empty halves wins:
//!
//! 1. `Comma`: exactly one comma.
//! 2. `Hyphen`: direction letters present and a joining `-` (not a sign)
//!    that divides the text into exactly two pieces, as in `453015N-1223030W`.
//! 3. `LeadingDirection`: the text starts with a direction letter; split
//!    right before the last direction letter, as in `N 45 30 W 122 10`.
//! 4. `TrailingDirection`: the text ends with a direction letter; split right
//!    after the first direction letter, as in `45 30 N 122 10 W`.
//! 5. `SingleSpace`: one space separating exactly two tokens.

use tracing::debug;

use crate::coordinate::axis::AxisValue;
use crate::coordinate::point::{check_axis, Coordinate};
use crate::error::{Error, Result};
use crate::types::{AxisType, Direction};

/// One heuristic for dividing a combined coordinate string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    Comma,
    Hyphen,
    LeadingDirection,
    TrailingDirection,
    SingleSpace,
}

impl SplitRule {
    /// Rules in precedence order
    pub const ORDER: [SplitRule; 5] = [
        SplitRule::Comma,
        SplitRule::Hyphen,
        SplitRule::LeadingDirection,
        SplitRule::TrailingDirection,
        SplitRule::SingleSpace,
    ];

    /// Returns the name of this rule
    pub fn name(&self) -> &'static str {
        match self {
            SplitRule::Comma => "comma",
            SplitRule::Hyphen => "hyphen",
            SplitRule::LeadingDirection => "leading-direction",
            SplitRule::TrailingDirection => "trailing-direction",
            SplitRule::SingleSpace => "single-space",
        }
    }

    /// Applies this rule, returning two trimmed non-empty halves if it fits
    pub fn apply<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str)> {
        let text = text.trim();
        let halves = match self {
            SplitRule::Comma => split_exactly_two(text, ','),
            SplitRule::Hyphen => split_on_joining_hyphen(text),
            SplitRule::LeadingDirection => split_before_last_direction(text),
            SplitRule::TrailingDirection => split_after_first_direction(text),
            SplitRule::SingleSpace => split_exactly_two(text, ' '),
        }?;

        let (first, second) = (halves.0.trim(), halves.1.trim());
        if first.is_empty() || second.is_empty() {
            None
        } else {
            Some((first, second))
        }
    }
}

fn split_exactly_two(text: &str, separator: char) -> Option<(&str, &str)> {
    let mut pieces = text.split(separator);
    let first = pieces.next()?;
    let second = pieces.next()?;

    if pieces.next().is_some() {
        None
    } else {
        Some((first, second))
    }
}

/// Byte offsets of every N/S/E/W letter, either case
fn direction_positions(text: &str) -> Vec<usize> {
    text.char_indices()
        .filter(|(_, c)| Direction::from_letter(*c).is_some())
        .map(|(i, _)| i)
        .collect()
}

fn split_on_joining_hyphen(text: &str) -> Option<(&str, &str)> {
    if direction_positions(text).is_empty() {
        return None;
    }

    let (first, second) = split_exactly_two(text, '-')?;
    // A hyphen after whitespace (or at the start) is a sign, not a joint
    let joined = first.chars().last().is_some_and(|c| !c.is_whitespace());

    if joined {
        Some((first, second))
    } else {
        None
    }
}

fn split_before_last_direction(text: &str) -> Option<(&str, &str)> {
    let positions = direction_positions(text);
    let (&first, &last) = (positions.first()?, positions.last()?);

    if first == 0 {
        Some(text.split_at(last))
    } else {
        None
    }
}

fn split_after_first_direction(text: &str) -> Option<(&str, &str)> {
    let positions = direction_positions(text);
    let (&first, &last) = (positions.first()?, positions.last()?);

    // Direction letters are ASCII, one byte each
    if last + 1 == text.len() {
        Some(text.split_at(first + 1))
    } else {
        None
    }
}

/// Splits a two-axis string and parses each half
pub struct CombinedCoordinateParser;

impl CombinedCoordinateParser {
    /// Splits `text` into latitude and longitude halves using the first fitting rule
    pub fn split(text: &str) -> Result<(SplitRule, &str, &str)> {
        SplitRule::ORDER
            .iter()
            .find_map(|rule| rule.apply(text).map(|(lat, lon)| (*rule, lat, lon)))
            .ok_or_else(|| {
                Error::SplitAmbiguous(format!("cannot divide {:?} into latitude and longitude", text))
            })
    }

    /// Parses a combined string; both halves must parse for their axis
    pub fn parse(text: &str) -> Result<Coordinate> {
        let (rule, lat_text, lon_text) = Self::split(text)?;
        debug!(rule = rule.name(), latitude = lat_text, longitude = lon_text, "split coordinate");

        let latitude = Self::parse_half(lat_text, AxisType::Latitude)?;
        let longitude = Self::parse_half(lon_text, AxisType::Longitude)?;

        Coordinate::new(latitude, longitude)
    }

    /// Parses one half into signed decimal degrees
    ///
    /// Bare `[+-]digits[.digits]` numbers are decimal degrees, except
    /// unsigned-looking integers long enough to be compact `DDMM[SS]`, which
    /// go through [`AxisValue::parse`] with the sign as direction. Halves with
    /// a direction letter of their axis use the letter. A half naming only
    /// directions of the other axis is malformed.
    pub fn parse_half(text: &str, axis: AxisType) -> Result<f64> {
        if is_plain_decimal(text) && !is_compact_integer(text, axis) {
            if let Ok(value) = text.parse::<f64>() {
                return check_axis(value, axis);
            }
        }

        let has_direction = text
            .chars()
            .any(|c| Direction::from_letter(c).is_some_and(|d| axis.accepts(d)));

        AxisValue::parse(text, axis, !has_direction).map(|value| value.to_decimal())
    }
}

/// `[+-]digits[.digits]` with nothing else, so no exponents or `inf`
pub(crate) fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

    all_digits(whole) && fraction.map_or(true, all_digits)
}

/// An out-of-range integer with at least `DDMM` digits
fn is_compact_integer(text: &str, axis: AxisType) -> bool {
    let digits = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);

    digits.len() >= axis.degree_width() + 2 && digits.chars().all(|c| c.is_ascii_digit())
}
