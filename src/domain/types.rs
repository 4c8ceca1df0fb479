//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during pivoting
//! - exported to JSON
//! - handed to any renderer (text table, ASCII chart, TUI chart)

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A flat row fetched from the data-source boundary.
///
/// The three semantic fields are all optional: hosted tables routinely contain
/// partial rows, and the pivot is defined over whatever is present. Every other
/// column of the source row lands in `extras` untouched, so renderers can show
/// the full row without the pivot ever depending on unknown columns.
///
/// `extras` is a `BTreeMap` so derived output (table columns, JSON) has a
/// deterministic column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Raw date string as fetched (parsed later by the pivoter).
    pub date: Option<String>,
    /// Grouping series label.
    pub category: Option<String>,
    /// Numeric measure to plot.
    pub value: Option<f64>,
    /// All remaining columns of the source row.
    #[serde(default)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Record {
    pub fn new(date: Option<String>, category: Option<String>, value: Option<f64>) -> Self {
        Self {
            date,
            category,
            value,
            extras: BTreeMap::new(),
        }
    }
}

/// Which source columns hold the three semantic fields.
///
/// The tool is not tied to one schema: `--date-field created_at
/// --category-field sector --value-field current_price` points it at the
/// original `equitysharedetails` table unchanged.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub date: String,
    pub category: String,
    pub value: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            category: "category".to_string(),
            value: "value".to_string(),
        }
    }
}

/// An RGB color assigned to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed palette cycled by series index.
///
/// High-contrast colors that survive low-resolution terminal rendering.
pub const PALETTE: [Rgb; 6] = [
    Rgb(59, 130, 246),  // blue
    Rgb(168, 85, 247),  // purple
    Rgb(34, 197, 94),   // green
    Rgb(249, 115, 22),  // orange
    Rgb(236, 72, 153),  // pink
    Rgb(234, 179, 8),   // yellow
];

/// Color of the dashed overlay line.
pub const OVERLAY_COLOR: Rgb = Rgb(148, 163, 184); // slate

/// Deterministic color for a category series, cycling through the palette.
pub fn palette_color(series_index: usize) -> Rgb {
    PALETTE[series_index % PALETTE.len()]
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStyle {
    Bar,
    Line,
}

/// One plotted series, aligned to the dataset axis by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Rgb,
    pub style: SeriesStyle,
    pub dashed: bool,
}

/// Chart-ready output of the pivoter: formatted axis labels, one bar series
/// per category (first-seen order), and an optional overlay line.
///
/// Invariant: `values.len() == axis.len()` for every series, overlay included.
/// The dataset is an immutable snapshot; a new fetch rebuilds it from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub axis: Vec<String>,
    pub series: Vec<Series>,
    pub overlay: Option<Series>,
}

impl ChartDataset {
    /// Empty dataset: "nothing to draw", distinct from an error state.
    pub fn empty() -> Self {
        Self {
            axis: Vec::new(),
            series: Vec::new(),
            overlay: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// Category series followed by the overlay (the overlay is always last).
    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().chain(self.overlay.as_ref())
    }

    /// Largest plotted value across all series (0.0 for an empty dataset).
    pub fn max_value(&self) -> f64 {
        self.all_series()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Dark/light rendering theme for the TUI.
///
/// A single piece of externally owned UI state: the TUI owns one `Theme` and
/// passes it to draw code. Nothing global, nothing mutable behind the scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(palette_color(0), PALETTE[0]);
        assert_eq!(palette_color(PALETTE.len()), PALETTE[0]);
        assert_eq!(palette_color(PALETTE.len() + 2), PALETTE[2]);
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn max_value_ignores_non_finite() {
        let ds = ChartDataset {
            axis: vec!["01/01/2024".to_string()],
            series: vec![Series {
                label: "A".to_string(),
                values: vec![f64::NAN, 3.0],
                color: palette_color(0),
                style: SeriesStyle::Bar,
                dashed: false,
            }],
            overlay: None,
        };
        assert_eq!(ds.max_value(), 3.0);
    }
}
