#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else, clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod composer;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod maud_conveniences;
pub mod routes;
pub mod screen;
pub mod screens;
pub mod state;
pub mod submissions;

use crate::{
    routes::{
        crud::{crud_routes, internal_dismiss},
        index::{get_index_route, internal_get_dashboard},
        sse::sse_feed,
    },
    screens::{Courses, Enrollments, Students, Teachers},
    state::RegistrarState,
};
use axum::{Router, routing::get};
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

/// Form posts are small; anything larger than this is refused.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn router(state: RegistrarState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/internal/dashboard", get(internal_get_dashboard))
        .route("/internal/dismiss", get(internal_dismiss))
        .merge(crud_routes::<Students>())
        .merge(crud_routes::<Teachers>())
        .merge(crud_routes::<Courses>())
        .merge(crud_routes::<Enrollments>())
        .route("/sse_feed", get(sse_feed))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
