//! coordkit - coordinate parsing and formatting for free-form text
//!
//! coordkit turns human-typed positions (decimal degrees, degrees/minutes/
//! seconds in most of the ways people write them, MGRS and GARS references)
//! into a validated WGS84 [`Coordinate`], and writes coordinates back out in
//! any of those notations.
//!
//! # Examples
//!
//! ```
//! use coordkit::{coordinate, CoordinateSystem};
//!
//! let position = coordinate::parse("12-15.16N 071-57.30W")?;
//! assert_eq!(
//!     CoordinateSystem::Dms.format(&position)?,
//!     "12° 15' 10\" N, 71° 57' 18\" W"
//! );
//!
//! let cell = coordinate::parse_any("361HN37")?;
//! assert_eq!(CoordinateSystem::Mgrs.format(&cell)?, "31NAA6602100000");
//! # Ok::<(), coordkit::Error>(())
//! ```

pub mod api;
pub mod batch;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod grid;
pub mod logging;
pub mod types;

pub use coordinate::{
    AxisValue, CombinedCoordinateParser, Coordinate, CoordinateSystem, DecimalConverter,
    FreeTextFallbackParser, SplitRule,
};
pub use error::{Error, Result};
pub use grid::{Gars, GridReferenceCodec, Mgrs};
pub use types::{AxisType, Direction};
