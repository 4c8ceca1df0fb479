//! Command-line parsing for the equity chart tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pivot/rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{FieldMap, Theme};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "eqc",
    version,
    about = "Fetch equity share rows from a hosted store and chart them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch rows and print them as a table.
    Table(FetchArgs),
    /// Fetch rows, pivot, and render an ASCII chart.
    Chart(ChartArgs),
    /// Fetch rows, pivot, and write the chart dataset as JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// Fetching is triggered from inside the TUI; the same pipeline as
    /// `eqc chart` runs on each fetch.
    Tui(TuiArgs),
}

/// Common fetch options: which table to query and which columns carry the
/// three semantic fields.
#[derive(Debug, Parser, Clone)]
pub struct FetchArgs {
    /// Table to query.
    #[arg(short = 't', long, default_value = "equitysharedetails")]
    pub table: String,

    /// Column holding the calendar date.
    #[arg(long, default_value = "date")]
    pub date_field: String,

    /// Column holding the grouping category.
    #[arg(long, default_value = "category")]
    pub category_field: String,

    /// Column holding the numeric value to plot.
    #[arg(long, default_value = "value")]
    pub value_field: String,

    /// Use the bundled sample rows instead of the remote store.
    #[arg(long)]
    pub sample: bool,
}

impl FetchArgs {
    pub fn field_map(&self) -> FieldMap {
        FieldMap {
            date: self.date_field.clone(),
            category: self.category_field.clone(),
            value: self.value_field.clone(),
        }
    }
}

/// Options for the ASCII chart.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for JSON export.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Output path for the dataset JSON.
    #[arg(short = 'o', long)]
    pub out: PathBuf,
}

/// Options for the TUI.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Initial color theme (toggle with 't' inside the TUI).
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,
}
