//! HTTP interface over the parser, formatter and batch converter

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;
