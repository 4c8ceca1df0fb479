//! Plotters-powered chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart`/`BarChart` widgets?
//! - one renderer handles bars and the overlay line in a shared coordinate space
//! - nicer axis + tick-label handling
//! - easy to extend later (PNG/SVG export backends, annotations, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{ChartDataset, Rgb, SeriesStyle, Theme};

/// A lightweight, render-only chart widget.
///
/// The widget is intentionally data-driven: the dataset is computed by the
/// pivoter before the render call, so `render()` only maps it onto the canvas.
/// X coordinates are axis indices (`0..n`); each date slot holds one bar per
/// category, with the overlay line drawn through the slot centers.
pub struct EquityChart<'a> {
    pub dataset: &'a ChartDataset,
    pub theme: Theme,
}

impl Widget for EquityChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n_dates = self.dataset.axis.len();
        if n_dates == 0 {
            return;
        }

        let y_max = {
            let max = self.dataset.max_value();
            if max > 0.0 { max * 1.05 } else { 1.0 }
        };

        let fg = match self.theme {
            Theme::Dark => WHITE,
            Theme::Light => BLACK,
        };

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(0.0..n_dates as f64, 0.0..y_max)?;

            // Axes + tick labels. Mesh lines are disabled to reduce clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n_dates.min(5))
                .y_labels(5)
                .x_label_formatter(&|v| {
                    let idx = v.floor() as usize;
                    self.dataset.axis.get(idx).cloned().unwrap_or_default()
                })
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&fg))
                .axis_style(&fg)
                .bold_line_style(&fg)
                .draw()?;

            let n_cats = self.dataset.series.len().max(1);
            // Bars fill 80% of the slot; 10% padding each side.
            let bar_w = 0.8 / n_cats as f64;

            for (ci, series) in self.dataset.series.iter().enumerate() {
                let color = plotters_color(series.color);
                match series.style {
                    SeriesStyle::Bar => {
                        chart.draw_series(series.values.iter().enumerate().filter_map(
                            |(di, &v)| {
                                if !(v.is_finite() && v > 0.0) {
                                    return None;
                                }
                                let x0 = di as f64 + 0.1 + ci as f64 * bar_w;
                                Some(Rectangle::new([(x0, 0.0), (x0 + bar_w, v)], color.filled()))
                            },
                        ))?;
                    }
                    SeriesStyle::Line if series.dashed => {
                        chart.draw_series(DashedLineSeries::new(
                            line_points(&series.values),
                            4,
                            2,
                            color.stroke_width(1),
                        ))?;
                    }
                    SeriesStyle::Line => {
                        chart.draw_series(LineSeries::new(
                            line_points(&series.values),
                            color.stroke_width(1),
                        ))?;
                    }
                }
            }

            // Overlay line through the slot centers, always drawn last.
            if let Some(overlay) = &self.dataset.overlay {
                let color = plotters_color(overlay.color);
                if overlay.dashed {
                    chart.draw_series(DashedLineSeries::new(
                        line_points(&overlay.values),
                        4,
                        2,
                        color.stroke_width(1),
                    ))?;
                } else {
                    chart.draw_series(LineSeries::new(
                        line_points(&overlay.values),
                        color.stroke_width(1),
                    ))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Line vertices at the center of each date slot.
fn line_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(di, &v)| (di as f64 + 0.5, v))
        .collect()
}

fn plotters_color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_points_sit_at_slot_centers() {
        assert_eq!(
            line_points(&[5.0, 10.0]),
            vec![(0.5, 5.0), (1.5, 10.0)]
        );
    }
}
