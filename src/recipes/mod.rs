//! Normalization and aggregation over the raw upstream records, plus the
//! JSON API the UI consumes. All reshaping of the upstream schema happens
//! here; handlers stay thin.

mod dto;
pub mod handlers;
mod model;
mod service;
mod session;

pub use service::RecipeService;
pub use session::SearchSession;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::read_routes()
}
