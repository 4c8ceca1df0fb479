//! Data-source boundary.
//!
//! The pivoter only ever sees `Vec<Record>`; where the rows come from is
//! hidden behind the narrow [`RowSource`] trait. Any storage technology that
//! can produce flat rows is interchangeable here — the bundled implementations
//! are a Supabase/PostgREST client and an offline sample set.

pub mod rest;
pub mod sample;

pub use rest::{RestClient, RestSource};
pub use sample::SampleSource;

use crate::domain::Record;
use crate::error::AppError;

/// Read-only "fetch rows" capability.
///
/// One call returns the full result set at once; there is no streaming,
/// pagination, or retry at this seam.
pub trait RowSource {
    /// Short human-readable label for summaries/status lines.
    fn describe(&self) -> String;

    /// Fetch all rows, or fail with a human-readable message.
    fn fetch_rows(&self) -> Result<Vec<Record>, AppError>;
}
