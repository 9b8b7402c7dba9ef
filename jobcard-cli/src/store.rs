//! Pricing matrix store: the persisted JSON snapshot.

use anyhow::{Context, Result};
use jobcard_core::PricingMatrix;
use std::path::Path;
use tracing::{debug, error};

/// Load the stored matrix. A missing file gives the seed matrix.
pub fn load_matrix(path: &Path) -> Result<PricingMatrix> {
    if !path.exists() {
        debug!("No pricing matrix at {}, starting from seed", path.display());
        return Ok(PricingMatrix::seed());
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    PricingMatrix::from_json(&json)
        .inspect_err(|e| {
            if e.is_data_integrity() {
                error!(
                    "Stored pricing matrix {} is corrupt and needs repair: {}",
                    path.display(),
                    e
                );
            }
        })
        .with_context(|| format!("Failed to load pricing matrix {}", path.display()))
}

/// Replace the stored matrix with a new snapshot.
pub fn save_matrix(path: &Path, matrix: &PricingMatrix) -> Result<()> {
    let json = matrix.to_json_pretty()?;

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    std::fs::write(&tmp_path, json)
        .with_context(|| format!("Failed to write {}", Path::new(&tmp_path).display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!("Saved {} material(s) to {}", matrix.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobcard_core::{JobCardError, PricingConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_store_starts_from_seed() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = load_matrix(&dir.path().join("pricing_matrix.json")).unwrap();
        assert_eq!(matrix.names().collect::<Vec<_>>(), vec!["Colorsteel", "Euramax"]);
        assert_eq!(matrix, PricingMatrix::seed());
    }

    #[test]
    fn test_saved_empty_matrix_stays_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing_matrix.json");
        let emptied = PricingMatrix::seed()
            .without_material("Euramax")
            .unwrap()
            .without_material("Colorsteel")
            .unwrap();

        save_matrix(&path, &emptied).unwrap();
        assert!(load_matrix(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing_matrix.json");
        let matrix = PricingMatrix::new()
            .with_material("Colorsteel", &PricingConfig::new(20))
            .unwrap()
            .update_material("Colorsteel", |m| m.with_span(19.0, 20))
            .unwrap();

        save_matrix(&path, &matrix).unwrap();
        assert_eq!(load_matrix(&path).unwrap(), matrix);
        assert!(!dir.path().join("pricing_matrix.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_store_reports_data_integrity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing_matrix.json");
        std::fs::write(
            &path,
            r#"{ "Steel": { "baseRateMultiplier": 1, "folds": [1], "rates": { "x": { "1": 1 } } } }"#,
        )
        .unwrap();

        let err = load_matrix(&path).unwrap_err();
        let core = err.downcast_ref::<JobCardError>().unwrap();
        assert!(core.is_data_integrity());
    }
}
