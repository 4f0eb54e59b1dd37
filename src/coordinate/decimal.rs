//! Conversion between [`AxisValue`] and decimal degrees

use crate::coordinate::axis::{carry, AxisValue};
use crate::coordinate::point::check_axis;
use crate::error::Result;
use crate::types::AxisType;

/// Converts between degrees/minutes/seconds and signed decimal degrees
pub struct DecimalConverter;

impl DecimalConverter {
    /// Returns `degrees + minutes/60 + seconds/3600`, negative for south and west
    pub fn to_decimal(value: &AxisValue) -> f64 {
        let magnitude = value.degrees() as f64
            + value.minutes() as f64 / 60.0
            + value.seconds() as f64 / 3600.0;

        if value.direction().is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Splits a decimal value into whole degrees, minutes and rounded seconds
    pub fn from_decimal(value: f64, axis: AxisType) -> Result<AxisValue> {
        check_axis(value, axis)?;
        Ok(Self::split(value, axis))
    }

    /// Infallible split for values already known to be within the axis range
    pub(crate) fn split(value: f64, axis: AxisType) -> AxisValue {
        let direction = if value < 0.0 {
            axis.negative()
        } else {
            axis.positive()
        };

        let magnitude = value.abs();
        let degrees = magnitude.trunc();
        let total_minutes = (magnitude - degrees) * 60.0;
        let minutes = total_minutes.floor();
        let seconds = ((total_minutes - minutes) * 60.0).round();

        let (degrees, minutes, seconds) = carry(degrees as u32, minutes as u32, seconds as u32);
        AxisValue::from_parts_unchecked(degrees, minutes, seconds, direction)
    }
}

impl AxisValue {
    /// Returns this value as signed decimal degrees
    pub fn to_decimal(&self) -> f64 {
        DecimalConverter::to_decimal(self)
    }

    /// Converts signed decimal degrees into an axis value
    pub fn from_decimal(value: f64, axis: AxisType) -> Result<Self> {
        DecimalConverter::from_decimal(value, axis)
    }
}
