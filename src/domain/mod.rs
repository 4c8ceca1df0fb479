//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - fetched input rows (`Record`, `FieldMap`)
//! - chart-ready output (`ChartDataset`, `Series`, `SeriesStyle`)
//! - presentation state (`Theme`, the series color palette)

pub mod types;

pub use types::*;
