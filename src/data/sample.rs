//! Bundled sample rows for offline use.
//!
//! Shaped like the hosted `equitysharedetails` table: month-end price
//! observations per sector, plus the extra identifying columns a real table
//! carries. Deterministic by construction, so every command (and the ASCII
//! chart's golden output) works without credentials.

use serde_json::json;

use crate::data::RowSource;
use crate::domain::Record;
use crate::error::AppError;

/// A `RowSource` serving the bundled rows.
pub struct SampleSource;

impl RowSource for SampleSource {
    fn describe(&self) -> String {
        "sample".to_string()
    }

    fn fetch_rows(&self) -> Result<Vec<Record>, AppError> {
        Ok(sample_records())
    }
}

/// Three sectors observed over four month-ends, with one missing price
/// (renders as a 0-height bar and `N/A` in the table).
pub fn sample_records() -> Vec<Record> {
    let rows: [(&str, &str, Option<f64>, &str, &str); 12] = [
        ("2024-01-31", "Banking", Some(1482.60), "HDFC Bank", "HDFCBANK"),
        ("2024-01-31", "Energy", Some(2711.35), "Reliance Industries", "RELIANCE"),
        ("2024-01-31", "IT", Some(3845.10), "TCS", "TCS"),
        ("2024-02-29", "Banking", Some(1398.45), "HDFC Bank", "HDFCBANK"),
        ("2024-02-29", "Energy", Some(2954.80), "Reliance Industries", "RELIANCE"),
        ("2024-02-29", "IT", Some(4012.25), "TCS", "TCS"),
        ("2024-03-28", "Banking", Some(1447.90), "HDFC Bank", "HDFCBANK"),
        ("2024-03-28", "Energy", Some(2971.70), "Reliance Industries", "RELIANCE"),
        ("2024-03-28", "IT", None, "TCS", "TCS"),
        ("2024-04-30", "Banking", Some(1519.25), "HDFC Bank", "HDFCBANK"),
        ("2024-04-30", "Energy", Some(2931.05), "Reliance Industries", "RELIANCE"),
        ("2024-04-30", "IT", Some(3829.55), "TCS", "TCS"),
    ];

    rows.into_iter()
        .map(|(date, sector, price, company, symbol)| {
            let mut rec = Record::new(Some(date.to_string()), Some(sector.to_string()), price);
            rec.extras
                .insert("company_name".to_string(), json!(company));
            rec.extras.insert("symbol".to_string(), json!(symbol));
            rec
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivot::pivot;

    #[test]
    fn sample_pivots_to_a_well_formed_dataset() {
        let ds = pivot(&sample_records());
        assert_eq!(ds.axis.len(), 4);
        assert_eq!(ds.series.len(), 3);
        for s in ds.all_series() {
            assert_eq!(s.values.len(), ds.axis.len());
        }
        assert!(ds.overlay.is_some());
        // The missing IT price on 28/03 shows as 0, not a gap.
        assert_eq!(ds.series[2].values[2], 0.0);
    }

    #[test]
    fn sample_source_is_infallible_and_labeled() {
        let source = SampleSource;
        assert_eq!(source.describe(), "sample");
        assert_eq!(source.fetch_rows().unwrap().len(), 12);
    }
}
