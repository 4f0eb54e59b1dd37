use coordkit::api::create_router;
use coordkit::config::ServerConfig;
use coordkit::logging::setup_logging;
use tracing::info;

#[tokio::main]
async fn main() -> coordkit::Result<()> {
    let config = ServerConfig::from_env()?;
    setup_logging(&config.log_level)?;

    let app = create_router(&config);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    info!(
        addr = %config.bind_addr,
        default_system = %config.default_system,
        body_limit = config.body_limit,
        "coordkit API server listening"
    );
    info!("GET  /api/parse?text=<text>&system=<WGS84|DMS|MGRS|GARS>");
    info!("GET  /api/format?latitude=<lat>&longitude=<lon>&system=<name>");
    info!("POST /api/upload (multipart/form-data: csv file + optional system)");

    axum::serve(listener, app).await?;
    Ok(())
}
