//! Core data types for coordkit

use std::fmt;

/// The two axes of a geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisType {
    /// North/south axis, 0 to 90 degrees
    Latitude,
    /// East/west axis, 0 to 180 degrees
    Longitude,
}

impl AxisType {
    /// Returns the largest legal whole-degree value for this axis
    pub fn max_degrees(&self) -> u32 {
        match self {
            AxisType::Latitude => 90,
            AxisType::Longitude => 180,
        }
    }

    /// Returns the number of digits used for degrees in compact notation
    pub fn degree_width(&self) -> usize {
        match self {
            AxisType::Latitude => 2,
            AxisType::Longitude => 3,
        }
    }

    /// Returns the direction used for non-negative values
    pub fn positive(&self) -> Direction {
        match self {
            AxisType::Latitude => Direction::North,
            AxisType::Longitude => Direction::East,
        }
    }

    /// Returns the direction used for negative values
    pub fn negative(&self) -> Direction {
        match self {
            AxisType::Latitude => Direction::South,
            AxisType::Longitude => Direction::West,
        }
    }

    /// Returns true if `direction` is legal for this axis
    pub fn accepts(&self, direction: Direction) -> bool {
        direction.axis() == *self
    }

    /// Returns the name of this axis
    pub fn name(&self) -> &'static str {
        match self {
            AxisType::Latitude => "latitude",
            AxisType::Longitude => "longitude",
        }
    }
}

/// Cardinal direction letter attached to one axis value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Maps a direction letter (either case) to a direction
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    /// Maps a spelled-out direction word (either case) to a direction
    pub fn from_word(word: &str) -> Option<Self> {
        let mut chars = word.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            return Self::from_letter(letter);
        }

        match word.to_ascii_uppercase().as_str() {
            "NORTH" => Some(Direction::North),
            "SOUTH" => Some(Direction::South),
            "EAST" => Some(Direction::East),
            "WEST" => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the upper-case letter for this direction
    pub fn letter(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    /// Returns the axis this direction belongs to
    pub fn axis(&self) -> AxisType {
        match self {
            Direction::North | Direction::South => AxisType::Latitude,
            Direction::East | Direction::West => AxisType::Longitude,
        }
    }

    /// Returns true for south and west
    pub fn is_negative(&self) -> bool {
        matches!(self, Direction::South | Direction::West)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
