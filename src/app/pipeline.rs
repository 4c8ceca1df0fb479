//! Shared "fetch and pivot" pipeline used by the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch rows -> pivot -> dataset + row-level stats
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::RowSource;
use crate::domain::{ChartDataset, Record};
use crate::error::AppError;
use crate::pivot::{count_unparseable_dates, pivot};

/// All computed outputs of a single fetch.
///
/// An immutable snapshot: a new fetch rebuilds everything from scratch and
/// replaces the previous `RunOutput` wholesale.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Label of the source that produced the rows.
    pub source: String,
    /// The raw rows, kept for table rendering.
    pub rows: Vec<Record>,
    /// The pivoted chart dataset.
    pub dataset: ChartDataset,
    /// Rows whose date could not be parsed (absent from the axis).
    pub unparseable_dates: usize,
}

/// Fetch all rows from `source` and pivot them.
///
/// A fetch error propagates as-is; the pivot itself cannot fail.
pub fn run_fetch(source: &dyn RowSource) -> Result<RunOutput, AppError> {
    let rows = source.fetch_rows()?;
    Ok(pivot_rows(source.describe(), rows))
}

/// Pivot pre-fetched rows. Useful for tests and for re-rendering without
/// a second network read.
pub fn pivot_rows(source: String, rows: Vec<Record>) -> RunOutput {
    let dataset = pivot(&rows);
    let unparseable_dates = count_unparseable_dates(&rows);
    RunOutput {
        source,
        rows,
        dataset,
        unparseable_dates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleSource;

    #[test]
    fn run_fetch_pivots_sample_rows() {
        let run = run_fetch(&SampleSource).unwrap();
        assert_eq!(run.source, "sample");
        assert_eq!(run.rows.len(), 12);
        assert!(!run.dataset.is_empty());
        assert_eq!(run.unparseable_dates, 0);
    }

    #[test]
    fn empty_fetch_is_a_valid_empty_run() {
        let run = pivot_rows("test".to_string(), Vec::new());
        assert!(run.rows.is_empty());
        assert!(run.dataset.is_empty());
        assert!(run.dataset.overlay.is_none());
    }
}
