pub mod submit;

use axum::Router;
use axum::routing::{options, post};

use crate::state::SharedState;

pub fn submit_routes() -> Router<SharedState> {
    Router::new()
        .route("/submit", post(submit::submit))
        .route("/submit", options(submit::submit_options))
}
