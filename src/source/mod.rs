//! Dataset loading from the analysis data endpoint.
//!
//! One GET per load; the dashboard decides what to do with the outcome.

mod client;
mod types;

pub use self::client::*;
pub use self::types::*;
