//! Deterministic text formatting for terminal output.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::app::pipeline::RunOutput;
use crate::domain::Record;

/// Format the run summary printed above tables/charts.
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== eqc - Equity Share Charts ===\n");
    out.push_str(&format!("Source: {}\n", run.source));
    out.push_str(&format!(
        "Rows: n={} | unusable dates: {}\n",
        run.rows.len(),
        run.unparseable_dates
    ));

    if run.dataset.is_empty() {
        out.push_str("Axis: (empty — nothing to chart)\n");
    } else {
        out.push_str(&format!(
            "Axis: {} dates [{} .. {}]\n",
            run.dataset.axis.len(),
            run.dataset.axis.first().map(String::as_str).unwrap_or(""),
            run.dataset.axis.last().map(String::as_str).unwrap_or(""),
        ));
    }

    let labels: Vec<&str> = run.dataset.series.iter().map(|s| s.label.as_str()).collect();
    if labels.is_empty() {
        out.push_str("Series: (none)\n");
    } else {
        let overlay_note = match &run.dataset.overlay {
            Some(ov) => format!(" (+ {} overlay)", ov.label),
            None => String::new(),
        };
        out.push_str(&format!("Series: {}{overlay_note}\n", labels.join(", ")));
    }

    out
}

/// Format fetched rows as an aligned text table.
///
/// Columns: the three semantic fields first, then every extra column present
/// anywhere in the rows (deterministic order). Absent cells render as `N/A`,
/// matching the source product's placeholder.
pub fn format_row_table(rows: &[Record]) -> String {
    if rows.is_empty() {
        return "No data available. Fetch returned 0 records.\n".to_string();
    }

    let extra_keys: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.extras.keys().map(String::as_str))
        .collect();

    let mut header: Vec<String> = vec![
        "Date".to_string(),
        "Category".to_string(),
        "Value".to_string(),
    ];
    header.extend(extra_keys.iter().map(|k| k.to_string()));

    let mut body: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for r in rows {
        let mut cells = vec![
            r.date.clone().unwrap_or_else(|| "N/A".to_string()),
            r.category.clone().unwrap_or_else(|| "N/A".to_string()),
            format_value(r.value),
        ];
        for key in &extra_keys {
            cells.push(match r.extras.get(*key) {
                Some(v) => extra_display(v),
                None => "N/A".to_string(),
            });
        }
        body.push(cells);
    }

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("Equity share details ({} records)\n", rows.len()));
    out.push_str(&format_table_line(&header, &widths));
    out.push_str(&format_rule(&widths));
    for row in &body {
        out.push_str(&format_table_line(row, &widths));
    }
    out
}

fn format_table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, &width) in cells.iter().zip(widths) {
        line.push_str(&format!("{cell:<width$}  "));
    }
    line.trim_end().to_string() + "\n"
}

fn format_rule(widths: &[usize]) -> String {
    let mut line = String::new();
    for width in widths {
        line.push_str(&"-".repeat(*width));
        line.push_str("  ");
    }
    line.trim_end().to_string() + "\n"
}

/// Format an optional numeric value for display.
///
/// `N/A` for absent values; otherwise two decimals with en-IN digit grouping
/// (the source product formatted prices with the `en-IN` locale): the last
/// three integer digits group together, then pairs — `12,34,567.89`.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if !v.is_finite() => "N/A".to_string(),
        Some(v) => group_indian(v),
    }
}

fn group_indian(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let s = format!("{:.2}", v.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    if int_part.len() <= 3 {
        return format!("{sign}{int_part}.{frac_part}");
    }

    let (head, tail) = int_part.split_at(int_part.len() - 3);
    let mut groups = vec![tail.to_string()];
    let mut rest = head;
    while rest.len() > 2 {
        let split = rest.len() - 2;
        groups.push(rest[split..].to_string());
        rest = &rest[..split];
    }
    if !rest.is_empty() {
        groups.push(rest.to_string());
    }
    groups.reverse();

    format!("{sign}{}.{frac_part}", groups.join(","))
}

fn extra_display(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indian_grouping() {
        assert_eq!(format_value(Some(123.0)), "123.00");
        assert_eq!(format_value(Some(4500.0)), "4,500.00");
        assert_eq!(format_value(Some(123456.0)), "1,23,456.00");
        assert_eq!(format_value(Some(1234567.89)), "12,34,567.89");
        assert_eq!(format_value(Some(-98765.4)), "-98,765.40");
        assert_eq!(format_value(None), "N/A");
        assert_eq!(format_value(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn row_table_includes_extras_and_placeholders() {
        let mut r1 = Record::new(
            Some("2024-01-31".to_string()),
            Some("Banking".to_string()),
            Some(1482.6),
        );
        r1.extras.insert("symbol".to_string(), json!("HDFCBANK"));
        let r2 = Record::new(None, None, None);

        let table = format_row_table(&[r1, r2]);
        assert!(table.starts_with("Equity share details (2 records)"));
        assert!(table.contains("symbol"));
        assert!(table.contains("HDFCBANK"));
        assert!(table.contains("1,482.60"));
        assert!(table.contains("N/A"));
    }

    #[test]
    fn empty_rows_render_explicit_empty_state() {
        let table = format_row_table(&[]);
        assert!(table.contains("0 records"));
    }
}
