//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - category bars: one glyph column per category, cycling `# % @ + x o`
//! - overlay line: `*` at data points, `.` dashes between them

use crate::domain::ChartDataset;

/// Glyphs cycled per category series, mirroring the color palette cycling.
const BAR_GLYPHS: [char; 6] = ['#', '%', '@', '+', 'x', 'o'];

/// Render a grouped-bar chart with the dashed overlay line.
///
/// An empty dataset renders an explicit empty-state message, not an error.
pub fn render_ascii_chart(dataset: &ChartDataset, width: usize, height: usize) -> String {
    if dataset.is_empty() {
        return "No data to chart. Fetch returned no plottable rows.\n".to_string();
    }

    let width = width.max(20);
    let height = height.max(5);

    let n_dates = dataset.axis.len();

    let y_max = {
        let max = dataset.max_value();
        if max > 0.0 { max * 1.05 } else { 1.0 }
    };

    let mut grid = vec![vec![' '; width]; height];
    let slot_w = (width / n_dates).max(1);

    // Bars: one glyph column per category inside each date slot.
    for (ci, series) in dataset.series.iter().enumerate() {
        let glyph = BAR_GLYPHS[ci % BAR_GLYPHS.len()];
        for (di, &v) in series.values.iter().enumerate() {
            if !(v.is_finite() && v > 0.0) {
                continue;
            }
            let x = di * slot_w + 1 + ci;
            if x >= width || x >= (di + 1) * slot_w {
                continue; // slot too narrow for this many categories
            }
            let top = map_y(v, y_max, height);
            for row in grid.iter_mut().take(height).skip(top) {
                row[x] = glyph;
            }
        }
    }

    // Overlay line: markers at slot centers, dashes in between.
    if let Some(overlay) = &dataset.overlay {
        let center = |di: usize| (di * slot_w + slot_w / 2).min(width - 1);
        for di in 1..n_dates {
            let (x0, x1) = (center(di - 1), center(di));
            let (v0, v1) = (overlay.values[di - 1], overlay.values[di]);
            if x1 <= x0 || !(v0.is_finite() && v1.is_finite()) {
                continue;
            }
            for x in x0..=x1 {
                // Dashed: draw every other column between the markers.
                if (x - x0) % 2 == 1 {
                    let t = (x - x0) as f64 / (x1 - x0) as f64;
                    let v = v0 + (v1 - v0) * t;
                    grid[map_y(v, y_max, height)][x] = '.';
                }
            }
        }
        for (di, &v) in overlay.values.iter().enumerate() {
            if v.is_finite() {
                grid[map_y(v, y_max, height)][center(di)] = '*';
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Chart: {} dates [{} .. {}] | value=[0.00, {:.2}]\n",
        n_dates,
        dataset.axis.first().map(String::as_str).unwrap_or(""),
        dataset.axis.last().map(String::as_str).unwrap_or(""),
        y_max,
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&"-".repeat(width));
    out.push('\n');

    // Legend.
    for (ci, series) in dataset.series.iter().enumerate() {
        out.push_str(&format!(
            "{} {}\n",
            BAR_GLYPHS[ci % BAR_GLYPHS.len()],
            series.label
        ));
    }
    if let Some(overlay) = &dataset.overlay {
        out.push_str(&format!("* {} (overlay, dashed)\n", overlay.label));
    }

    out
}

/// Map a value to a grid row (row 0 is the top).
fn map_y(v: f64, y_max: f64, height: usize) -> usize {
    let frac = (v / y_max).clamp(0.0, 1.0);
    let row = ((1.0 - frac) * (height - 1) as f64).round() as usize;
    row.min(height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_records;
    use crate::pivot::pivot;

    #[test]
    fn empty_dataset_renders_empty_state() {
        let out = render_ascii_chart(&ChartDataset::empty(), 80, 20);
        assert!(out.contains("No data to chart"));
    }

    #[test]
    fn chart_has_expected_shape_and_legend() {
        let ds = pivot(&sample_records());
        let (width, height) = (80, 20);
        let out = render_ascii_chart(&ds, width, height);
        let lines: Vec<&str> = out.lines().collect();

        // header + grid + rule + 3 category legend lines + overlay legend
        assert_eq!(lines.len(), 1 + height + 1 + ds.series.len() + 1);
        for line in &lines[1..=height] {
            assert_eq!(line.chars().count(), width);
        }
        assert!(out.contains("# Banking"));
        assert!(out.contains("% Energy"));
        assert!(out.contains("@ IT"));
        assert!(out.contains("* Index (overlay, dashed)"));
        assert!(out.contains('*'));
    }

    #[test]
    fn render_is_deterministic() {
        let ds = pivot(&sample_records());
        assert_eq!(
            render_ascii_chart(&ds, 100, 25),
            render_ascii_chart(&ds, 100, 25)
        );
    }
}
