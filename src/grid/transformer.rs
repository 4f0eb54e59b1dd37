//! WGS84 to UTM and UPS projections through PROJ

use proj::Proj;

use crate::error::{Error, Result};

pub const WGS84_EPSG: u16 = 4326;
const UPS_NORTH_EPSG: u16 = 32661;
const UPS_SOUTH_EPSG: u16 = 32761;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn of(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }
}

/// Easting and northing in metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub easting: f64,
    pub northing: f64,
}

/// EPSG code of the WGS 84 / UTM zone for a hemisphere
pub fn utm_epsg(zone: u8, hemisphere: Hemisphere) -> u16 {
    match hemisphere {
        Hemisphere::North => 32600 + zone as u16,
        Hemisphere::South => 32700 + zone as u16,
    }
}

/// EPSG code of the WGS 84 / UPS grid for a hemisphere
pub fn ups_epsg(hemisphere: Hemisphere) -> u16 {
    match hemisphere {
        Hemisphere::North => UPS_NORTH_EPSG,
        Hemisphere::South => UPS_SOUTH_EPSG,
    }
}

/// Projects WGS84 positions onto a planar grid and back
pub struct Transformer {
    proj: Proj,
    to_epsg: u16,
}

impl Transformer {
    /// Creates a transformer from WGS84 to the given EPSG grid
    pub fn new(to_epsg: u16) -> Result<Self> {
        let from = format!("EPSG:{}", WGS84_EPSG);
        let to = format!("EPSG:{}", to_epsg);

        let proj = Proj::new_known_crs(&from, &to, None)
            .map_err(|e| Error::Projection(format!("Failed to create projection: {}", e)))?;

        Ok(Self { proj, to_epsg })
    }

    pub fn utm(zone: u8, hemisphere: Hemisphere) -> Result<Self> {
        Self::new(utm_epsg(zone, hemisphere))
    }

    pub fn ups(hemisphere: Hemisphere) -> Result<Self> {
        Self::new(ups_epsg(hemisphere))
    }

    /// Projects a WGS84 position to easting and northing
    pub fn forward(&self, latitude: f64, longitude: f64) -> Result<GridPoint> {
        let (easting, northing) = self
            .proj
            .convert((longitude, latitude))
            .map_err(|e| Error::Projection(format!("Transformation failed: {}", e)))?;

        Ok(GridPoint { easting, northing })
    }

    /// Projects easting and northing back to `(latitude, longitude)`
    pub fn inverse(&self, point: GridPoint) -> Result<(f64, f64)> {
        let from = format!("EPSG:{}", self.to_epsg);
        let to = format!("EPSG:{}", WGS84_EPSG);

        let inverse_proj = Proj::new_known_crs(&from, &to, None)
            .map_err(|e| Error::Projection(format!("Failed to create inverse projection: {}", e)))?;

        let (longitude, latitude) = inverse_proj
            .convert((point.easting, point.northing))
            .map_err(|e| Error::Projection(format!("Inverse transformation failed: {}", e)))?;

        Ok((latitude, longitude))
    }

    pub fn to_epsg(&self) -> u16 {
        self.to_epsg
    }
}
