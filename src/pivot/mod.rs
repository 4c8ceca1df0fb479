//! The series pivoter: flat fetched rows -> chart-ready dataset.
//!
//! Takes an unordered collection of `Record`s (date, category, numeric value,
//! anything else in `extras`) and produces:
//!
//! - an x-axis of distinct dates, sorted by calendar time and formatted for display
//! - one bar series per distinct category, in first-seen order, with a value
//!   aligned to every axis position (0 where no matching row exists)
//! - a single dashed overlay line taking, per axis date, the value of the
//!   first row with that date in input order, ignoring category
//!
//! Design goals:
//! - **Deterministic**: first-seen/first-match rules only, no dependence on
//!   hash iteration order
//! - **Best-effort**: rows with unparseable dates drop out of the axis, they
//!   never abort the pivot
//! - **Pure**: no I/O, no presentation; the nested-lookup form is
//!   intentionally simple since inputs are one table's worth of rows
//!
//! The overlay rule ("first row per date, regardless of category") mirrors the
//! upstream product's behavior exactly, including its indifference to which
//! category happens to come first on a date.

use chrono::{DateTime, NaiveDate};

use crate::domain::{
    ChartDataset, OVERLAY_COLOR, Record, Series, SeriesStyle, palette_color,
};

/// Display format for axis labels (day/month/year).
const AXIS_LABEL_FMT: &str = "%d/%m/%Y";

/// Label given to the overlay line.
const OVERLAY_LABEL: &str = "Index";

/// Parse a fetched date string into a calendar date.
///
/// Hosted stores emit RFC 3339 timestamps (`created_at`), while hand-filled
/// tables tend to hold plain dates in a handful of conventions. We accept a
/// small fixed set to reduce friction while keeping parsing deterministic.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    None
}

/// Number of records carrying a date that failed to parse.
///
/// These records are absent from the pivoted axis; callers surface the count
/// in summaries/status lines.
pub fn count_unparseable_dates(records: &[Record]) -> usize {
    records
        .iter()
        .filter(|r| {
            r.date
                .as_deref()
                .is_some_and(|raw| parse_record_date(raw).is_none())
        })
        .count()
}

/// Pivot flat records into an axis-aligned chart dataset.
///
/// The output is an immutable snapshot rebuilt from scratch on every call;
/// pivoting the same input twice yields identical output.
pub fn pivot(records: &[Record]) -> ChartDataset {
    // Parse each record's date once, preserving input order for the
    // first-match lookups below.
    let parsed: Vec<Option<NaiveDate>> = records
        .iter()
        .map(|r| r.date.as_deref().and_then(parse_record_date))
        .collect();

    // Axis: distinct parseable dates, ascending by calendar time.
    let mut axis_dates: Vec<NaiveDate> = parsed.iter().flatten().copied().collect();
    axis_dates.sort_unstable();
    axis_dates.dedup();

    // Categories in first-seen order (governs output series order).
    let mut categories: Vec<&str> = Vec::new();
    for r in records {
        if let Some(c) = r.category.as_deref() {
            if !categories.contains(&c) {
                categories.push(c);
            }
        }
    }

    let series = categories
        .iter()
        .enumerate()
        .map(|(idx, &cat)| Series {
            label: cat.to_string(),
            values: axis_dates
                .iter()
                .map(|&d| first_value(records, &parsed, d, Some(cat)))
                .collect(),
            color: palette_color(idx),
            style: SeriesStyle::Bar,
            dashed: false,
        })
        .collect();

    // Overlay: first row per date in input order, category ignored.
    // Absent entirely when there is no axis to align to.
    let overlay = if axis_dates.is_empty() {
        None
    } else {
        Some(Series {
            label: OVERLAY_LABEL.to_string(),
            values: axis_dates
                .iter()
                .map(|&d| first_value(records, &parsed, d, None))
                .collect(),
            color: OVERLAY_COLOR,
            style: SeriesStyle::Line,
            dashed: true,
        })
    };

    ChartDataset {
        axis: axis_dates
            .iter()
            .map(|d| d.format(AXIS_LABEL_FMT).to_string())
            .collect(),
        series,
        overlay,
    }
}

/// Value of the first record (input order) on `date`, optionally restricted to
/// one category. Missing lookup or missing value both yield 0.
fn first_value(
    records: &[Record],
    parsed: &[Option<NaiveDate>],
    date: NaiveDate,
    category: Option<&str>,
) -> f64 {
    records
        .iter()
        .zip(parsed)
        .find(|(r, p)| {
            **p == Some(date)
                && match category {
                    Some(cat) => r.category.as_deref() == Some(cat),
                    None => true,
                }
        })
        .and_then(|(r, _)| r.value)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, category: &str, value: f64) -> Record {
        Record::new(Some(date.to_string()), Some(category.to_string()), Some(value))
    }

    #[test]
    fn worked_example_from_product() {
        // Input order deliberately not chronological.
        let records = vec![
            rec("2024-02-01", "Large", 10.0),
            rec("2024-01-01", "Large", 5.0),
            rec("2024-01-01", "Small", 7.0),
        ];
        let ds = pivot(&records);

        assert_eq!(ds.axis, vec!["01/01/2024", "01/02/2024"]);

        assert_eq!(ds.series.len(), 2);
        assert_eq!(ds.series[0].label, "Large");
        assert_eq!(ds.series[0].values, vec![5.0, 10.0]);
        assert_eq!(ds.series[1].label, "Small");
        assert_eq!(ds.series[1].values, vec![7.0, 0.0]);

        // Overlay: first row per date in input order ("Large" on both dates).
        let overlay = ds.overlay.expect("overlay present");
        assert_eq!(overlay.values, vec![5.0, 10.0]);
        assert!(overlay.dashed);
        assert_eq!(overlay.style, SeriesStyle::Line);
    }

    #[test]
    fn empty_input_is_empty_dataset() {
        let ds = pivot(&[]);
        assert!(ds.is_empty());
        assert!(ds.axis.is_empty());
        assert!(ds.series.is_empty());
        assert!(ds.overlay.is_none());
    }

    #[test]
    fn series_lengths_match_axis() {
        let records = vec![
            rec("2024-03-05", "A", 1.0),
            rec("2024-01-02", "B", 2.0),
            rec("2024-02-09", "C", 3.0),
            rec("2024-01-02", "A", 4.0),
        ];
        let ds = pivot(&records);
        assert_eq!(ds.axis.len(), 3);
        for s in ds.all_series() {
            assert_eq!(s.values.len(), ds.axis.len(), "series `{}`", s.label);
        }
    }

    #[test]
    fn axis_sorted_by_calendar_time_not_string_order() {
        // As strings, "02/01/2024" < "10/12/2023" would be wrong either way;
        // mix formats so only calendar comparison gives the right order.
        let records = vec![
            rec("2024-01-02", "A", 1.0),
            rec("10/12/2023", "A", 2.0),
            rec("2023-02-20", "A", 3.0),
        ];
        let ds = pivot(&records);
        assert_eq!(ds.axis, vec!["20/02/2023", "10/12/2023", "02/01/2024"]);
    }

    #[test]
    fn category_order_is_first_seen_not_sorted() {
        let records = vec![
            rec("2024-01-01", "Zeta", 1.0),
            rec("2024-01-01", "Alpha", 2.0),
            rec("2024-01-02", "Zeta", 3.0),
            rec("2024-01-02", "Mid", 4.0),
        ];
        let ds = pivot(&records);
        let labels: Vec<&str> = ds.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn duplicate_date_category_pair_uses_first_in_input_order() {
        let records = vec![
            rec("2024-01-01", "A", 11.0),
            rec("2024-01-01", "A", 99.0),
        ];
        let ds = pivot(&records);
        assert_eq!(ds.series[0].values, vec![11.0]);
        assert_eq!(ds.overlay.unwrap().values, vec![11.0]);
    }

    #[test]
    fn missing_value_defaults_to_zero_not_gap() {
        let records = vec![
            Record::new(Some("2024-01-01".to_string()), Some("A".to_string()), None),
            rec("2024-01-02", "A", 6.0),
        ];
        let ds = pivot(&records);
        assert_eq!(ds.series[0].values, vec![0.0, 6.0]);
        assert_eq!(ds.overlay.unwrap().values, vec![0.0, 6.0]);
    }

    #[test]
    fn unparseable_date_is_dropped_without_panicking() {
        let records = vec![
            rec("n/a", "A", 1.0),
            rec("2024-01-01", "A", 2.0),
        ];
        let ds = pivot(&records);
        assert_eq!(ds.axis, vec!["01/01/2024"]);
        assert_eq!(ds.series[0].values, vec![2.0]);
        assert_eq!(count_unparseable_dates(&records), 1);
    }

    #[test]
    fn category_seen_only_on_bad_date_rows_still_gets_a_series() {
        let records = vec![
            rec("bogus", "Ghost", 9.0),
            rec("2024-01-01", "A", 1.0),
        ];
        let ds = pivot(&records);
        let labels: Vec<&str> = ds.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Ghost", "A"]);
        assert_eq!(ds.series[0].values, vec![0.0]);
    }

    #[test]
    fn no_parseable_dates_yields_empty_axis_and_no_overlay() {
        let records = vec![rec("n/a", "A", 1.0)];
        let ds = pivot(&records);
        assert!(ds.axis.is_empty());
        assert!(ds.overlay.is_none());
        // The category still appears, aligned to the (empty) axis.
        assert_eq!(ds.series.len(), 1);
        assert!(ds.series[0].values.is_empty());
    }

    #[test]
    fn records_without_date_or_category_feed_neither_axis_nor_series() {
        let records = vec![
            Record::new(None, Some("A".to_string()), Some(3.0)),
            Record::new(Some("2024-01-01".to_string()), None, Some(4.0)),
        ];
        let ds = pivot(&records);
        assert_eq!(ds.axis, vec!["01/01/2024"]);
        assert_eq!(ds.series.len(), 1);
        // The dateless row never matches an axis date.
        assert_eq!(ds.series[0].values, vec![0.0]);
        // The category-less row still feeds the overlay.
        assert_eq!(ds.overlay.unwrap().values, vec![4.0]);
        assert_eq!(count_unparseable_dates(&records), 0);
    }

    #[test]
    fn pivot_is_idempotent() {
        let records = vec![
            rec("2024-02-01", "Large", 10.0),
            rec("2024-01-01", "Large", 5.0),
            rec("2024-01-01", "Small", 7.0),
        ];
        assert_eq!(pivot(&records), pivot(&records));
    }

    #[test]
    fn series_colors_cycle_deterministically() {
        let records: Vec<Record> = (0..8)
            .map(|i| rec("2024-01-01", &format!("C{i}"), 1.0))
            .collect();
        let ds = pivot(&records);
        assert_eq!(ds.series[0].color, palette_color(0));
        assert_eq!(ds.series[6].color, palette_color(0));
        assert_eq!(ds.series[7].color, palette_color(1));
    }

    #[test]
    fn parse_record_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        for raw in [
            "2024-01-02",
            "02/01/2024",
            "02-01-2024",
            "2024/01/02",
            "2024-01-02T09:30:00+00:00",
            "2024-01-02T09:30:00.123456+05:30",
            "  2024-01-02 ",
        ] {
            assert_eq!(parse_record_date(raw), Some(expected), "raw = {raw:?}");
        }
        assert_eq!(parse_record_date("n/a"), None);
        assert_eq!(parse_record_date(""), None);
        assert_eq!(parse_record_date("2024-13-40"), None);
    }
}
