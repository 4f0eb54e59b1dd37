use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, CoordinateSystem};

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRequest {
    pub text: String,
    /// Output notation; the server default when absent
    #[serde(default)]
    pub system: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub text: String,
    pub coordinate: Coordinate,
    pub system: CoordinateSystem,
    pub formatted: String,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub system: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub coordinate: Coordinate,
    pub system: CoordinateSystem,
    pub formatted: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
