//! Grid reference systems layered on WGS84
//!
//! [`Mgrs`] and [`Gars`] both turn a point into a short alphanumeric
//! reference and back. Decoding yields the south-west corner of the
//! referenced cell. MGRS projects through PROJ, so encoding can fail with
//! [`Error::Projection`](crate::error::Error::Projection).

pub mod gars;
pub mod mgrs;
pub mod transformer;

pub use gars::Gars;
pub use mgrs::Mgrs;

use crate::coordinate::Coordinate;
use crate::error::Result;

/// Encodes points as grid references and decodes them back
pub trait GridReferenceCodec: Send + Sync {
    /// Short upper-case name of the grid
    fn name(&self) -> &'static str;

    /// Encodes a point already known to be within WGS84 bounds
    fn encode(&self, latitude: f64, longitude: f64) -> Result<String>;

    /// Decodes a reference, ignoring whitespace and letter case
    fn decode(&self, reference: &str) -> Result<Coordinate>;

    fn encode_coordinate(&self, coordinate: &Coordinate) -> Result<String> {
        self.encode(coordinate.latitude(), coordinate.longitude())
    }
}
