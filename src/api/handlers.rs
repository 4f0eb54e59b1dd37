use std::sync::Arc;
use std::time::Instant;

use axum::extract::multipart::Multipart;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use super::models::*;
use crate::batch;
use crate::config::ServerConfig;
use crate::coordinate::{self, Coordinate, CoordinateSystem};
use crate::error::{Error, Result as CoordkitResult};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Status code for a library error
fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::MalformedInput(_)
        | Error::OutOfRange(_)
        | Error::SplitAmbiguous(_)
        | Error::InvalidGridReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Unsupported(_) | Error::Csv(_) | Error::Io(_) => StatusCode::BAD_REQUEST,
        Error::Config(_) | Error::Projection(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<Error> for (StatusCode, Json<ErrorResponse>) {
    fn from(error: Error) -> Self {
        api_error(status_for(&error), error.to_string())
    }
}

fn resolve_system(requested: Option<&str>, config: &ServerConfig) -> Result<CoordinateSystem, ApiError> {
    match requested.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => Ok(name.parse::<CoordinateSystem>()?),
        None => Ok(config.default_system),
    }
}

pub async fn parse_coordinate(
    State(config): State<Arc<ServerConfig>>,
    Query(req): Query<ParseRequest>,
) -> Result<Json<ParseResponse>, ApiError> {
    let start = Instant::now();
    let system = resolve_system(req.system.as_deref(), &config)?;

    let coordinate = coordinate::parse_any(&req.text).map_err(|e| {
        warn!(text = %req.text, error = %e, "rejected coordinate text");
        ApiError::from(e)
    })?;

    Ok(Json(ParseResponse {
        formatted: system.format(&coordinate)?,
        text: req.text,
        coordinate,
        system,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    }))
}

pub async fn format_coordinate(
    State(config): State<Arc<ServerConfig>>,
    Query(req): Query<FormatRequest>,
) -> Result<Json<FormatResponse>, ApiError> {
    let system = resolve_system(req.system.as_deref(), &config)?;
    let coordinate = Coordinate::new(req.latitude, req.longitude)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(FormatResponse {
        formatted: system.format(&coordinate)?,
        coordinate,
        system,
    }))
}

pub async fn upload_csv(
    State(config): State<Arc<ServerConfig>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut csv_data: Option<Vec<u8>> = None;
    let mut system_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "csv" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read CSV: {}", e)))?;
                csv_data = Some(bytes.to_vec());
            }
            "system" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read system: {}", e)))?;
                system_name = Some(text);
            }
            _ => {}
        }
    }

    let csv_data = csv_data.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing CSV file"))?;
    let system = resolve_system(system_name.as_deref(), &config)?;

    let csv_output = tokio::task::spawn_blocking(move || convert_upload(&csv_data, system))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Batch worker failed: {}", e)))??;

    Ok((
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref()),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"coordinates.csv\""),
        ],
        csv_output,
    )
        .into_response())
}

fn convert_upload(csv_data: &[u8], system: CoordinateSystem) -> CoordkitResult<String> {
    let report = batch::convert_csv(csv_data, system)?;
    info!(
        total = report.total(),
        failed = report.failed(),
        elapsed_ms = report.elapsed_ms,
        system = %system,
        "converted uploaded CSV"
    );
    report.to_csv()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State<Arc<ServerConfig>> {
        State(Arc::new(ServerConfig::default()))
    }

    #[tokio::test]
    async fn test_parse_coordinate() {
        let req = ParseRequest {
            text: "45 30 N 122 30 W".to_string(),
            system: Some("dms".to_string()),
        };
        let Json(response) = parse_coordinate(state(), Query(req)).await.unwrap();

        assert_eq!(response.system, CoordinateSystem::Dms);
        assert_eq!(response.formatted, "45° 30' 00\" N, 122° 30' 00\" W");
        assert_eq!(response.coordinate.latitude(), 45.5);
    }

    #[tokio::test]
    async fn test_parse_coordinate_uses_default_system() {
        let req = ParseRequest {
            text: "361HN37".to_string(),
            system: None,
        };
        let Json(response) = parse_coordinate(state(), Query(req)).await.unwrap();
        assert_eq!(response.formatted, "0.00000, 0.00000");
    }

    #[tokio::test]
    async fn test_parse_coordinate_rejections() {
        let req = ParseRequest {
            text: "north of nowhere".to_string(),
            system: None,
        };
        let (status, _) = parse_coordinate(state(), Query(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let req = ParseRequest {
            text: "45.5, -122.5".to_string(),
            system: Some("UTM".to_string()),
        };
        let (status, Json(body)) = parse_coordinate(state(), Query(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("UTM"));
    }

    #[tokio::test]
    async fn test_format_coordinate() {
        let req = FormatRequest {
            latitude: 0.0,
            longitude: 0.0,
            system: Some("MGRS".to_string()),
        };
        let Json(response) = format_coordinate(state(), Query(req)).await.unwrap();
        assert_eq!(response.formatted, "31NAA6602100000");

        let req = FormatRequest {
            latitude: 91.0,
            longitude: 0.0,
            system: None,
        };
        let (status, _) = format_coordinate(state(), Query(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_projection_failures_are_server_errors() {
        let (status, Json(body)) = ApiError::from(Error::Projection("no grid".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Projection error: no grid");
    }

    #[test]
    fn test_convert_upload() {
        let csv = convert_upload(b"text\n\"45.5, -122.5\"\nnothing\n", CoordinateSystem::Wgs84).unwrap();
        assert!(csv.contains("# Successful: 1\n"));
        assert!(csv.contains("45.50000, -122.50000"));
        assert!(csv.contains("nothing,,,,UNRECOGNIZED"));
    }
}
