//! Host page adapters
//!
//! The conversation core is the same everywhere; a host only decides what
//! goes into each request body, where the first turn comes from, and who to
//! tell when the interview is over.

mod standalone;
mod survey;

pub use standalone::StandaloneHost;
pub use survey::{SurveyHost, SurveyQuestion};
