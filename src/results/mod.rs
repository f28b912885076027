//! Transform stage and answer types
//!
//! Turns the search response into the text block sent to the model and the
//! suggestion tags shown to the user.

mod transform;
mod types;

pub use transform::{format_result, normalize_related, serialize_context, transform, Transformed};
pub use types::*;
