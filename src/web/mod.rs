//! Web server module
//!
//! Serves the single-page interface and a small JSON API over the
//! query orchestrator.

mod handlers;
mod routes;
mod state;
mod templates;

pub use handlers::{AnswerResponse, StateResponse};
pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
