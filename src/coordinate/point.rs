//! The validated WGS84 point every parser produces

use serde::Serialize;

use crate::coordinate::axis::AxisValue;
use crate::error::{Error, Result};
use crate::types::AxisType;

/// A WGS84 point in decimal degrees
///
/// Only constructed through the validating constructors, so latitude is
/// always within `[-90, 90]` and longitude within `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_axis(latitude, AxisType::Latitude)?;
        check_axis(longitude, AxisType::Longitude)?;

        Ok(Self { latitude, longitude })
    }

    /// Creates a coordinate from longitude/latitude order
    pub fn from_lonlat(longitude: f64, latitude: f64) -> Result<Self> {
        Self::new(latitude, longitude)
    }

    /// Creates a coordinate from a latitude and a longitude axis value
    pub fn from_axes(latitude: &AxisValue, longitude: &AxisValue) -> Result<Self> {
        if latitude.axis() != AxisType::Latitude || longitude.axis() != AxisType::Longitude {
            return Err(Error::MalformedInput(format!(
                "axis values {} and {} are not latitude then longitude",
                latitude, longitude
            )));
        }

        Self::new(latitude.to_decimal(), longitude.to_decimal())
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns true if both axes are within `tolerance` degrees of `other`
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

/// Checks a single decimal-degree value against the range of its axis
pub(crate) fn check_axis(value: f64, axis: AxisType) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::OutOfRange(format!("{} is not a finite number", axis.name())));
    }

    let max = axis.max_degrees() as f64;
    if value.abs() > max {
        return Err(Error::OutOfRange(format!(
            "{} {} outside [-{}, {}]",
            axis.name(),
            value,
            max,
            max
        )));
    }

    Ok(value)
}
