//! Export the pivoted dataset to JSON.
//!
//! The written structure is exactly the render-boundary shape: axis labels,
//! per-category series (label/values/color/style/dashed), optional overlay.

use std::path::Path;

use crate::domain::ChartDataset;
use crate::error::AppError;

/// Write `dataset` as pretty-printed JSON to `path`.
pub fn write_dataset_json(path: &Path, dataset: &ChartDataset) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(dataset)
        .map_err(|e| AppError::runtime(format!("Failed to serialize dataset: {e}")))?;
    std::fs::write(path, json + "\n")
        .map_err(|e| AppError::runtime(format!("Failed to write '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_records;
    use crate::pivot::pivot;

    #[test]
    fn dataset_serializes_with_render_boundary_shape() {
        let ds = pivot(&sample_records());
        let value = serde_json::to_value(&ds).unwrap();

        assert_eq!(value["axis"].as_array().unwrap().len(), 4);
        let first = &value["series"][0];
        assert_eq!(first["label"], "Banking");
        assert_eq!(first["style"], "bar");
        assert_eq!(first["dashed"], false);
        assert_eq!(value["overlay"]["style"], "line");
        assert_eq!(value["overlay"]["dashed"], true);
    }

    #[test]
    fn writes_file_with_trailing_newline() {
        let path = std::env::temp_dir().join("eqc-export-test.json");
        let ds = pivot(&sample_records());
        write_dataset_json(&path, &ds).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        let _ = std::fs::remove_file(&path);
    }
}
