//! Search stage
//!
//! Sends the user's query to the search provider and returns the organic
//! results plus any related searches.

mod error;
mod executor;
mod models;
mod serper;
mod traits;

pub use error::SearchError;
pub use executor::SearchStage;
pub use models::*;
pub use serper::Serper;
pub use traits::{SearchEngine, SearchProvider};
