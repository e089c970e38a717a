pub mod backend;
pub mod dual;

pub use backend::{NumericBackend, NumericBackendError, Real, lift_complex};
pub use dual::Dual;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NumericTolerance {
    #[serde(rename = "absTol")]
    pub abs_tol: f64,
    #[serde(rename = "relTol")]
    pub rel_tol: f64,
    #[serde(rename = "relativeFloor")]
    pub relative_floor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

/// Named tolerance categories used when checking observables against
/// reference tables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NumericTolerancePolicy {
    #[serde(rename = "policyVersion")]
    pub policy_version: String,
    #[serde(default)]
    pub categories: Vec<NumericToleranceCategory>,
}

impl NumericTolerancePolicy {
    pub fn tolerance_for_category(&self, category_id: &str) -> Option<NumericTolerance> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .and_then(|category| category.tolerance)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NumericToleranceCategory {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub tolerance: Option<NumericTolerance>,
}

#[derive(Debug, thiserror::Error)]
pub enum NumericTolerancePolicyError {
    #[error("failed to read numeric tolerance policy '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse numeric tolerance policy '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_numeric_tolerance_policy(
    policy_path: impl AsRef<Path>,
) -> Result<NumericTolerancePolicy, NumericTolerancePolicyError> {
    let policy_path = policy_path.as_ref();
    let source =
        fs::read_to_string(policy_path).map_err(|source| NumericTolerancePolicyError::Read {
            path: policy_path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&source).map_err(|source| NumericTolerancePolicyError::Parse {
        path: policy_path.to_path_buf(),
        source,
    })
}

pub fn compare_with_policy_tolerance(
    baseline: f64,
    actual: f64,
    tolerance: NumericTolerance,
) -> PolicyToleranceComparison {
    let abs_diff = (actual - baseline).abs();
    let rel_denominator = baseline.abs().max(tolerance.relative_floor);
    let rel_diff = abs_diff / rel_denominator;
    let passes = abs_diff <= tolerance.abs_tol || abs_diff <= tolerance.rel_tol * rel_denominator;

    PolicyToleranceComparison {
        abs_diff,
        rel_diff,
        passes,
    }
}

/// Evenly spaced grid including both endpoints.
pub fn linear_grid(start: f64, end: f64, count: usize) -> Option<Vec<f64>> {
    if count < 2 {
        return None;
    }

    let step = (end - start) / ((count - 1) as f64);
    let mut grid = Vec::with_capacity(count);
    for index in 0..count {
        grid.push(start + step * (index as f64));
    }

    if let Some(last) = grid.last_mut() {
        *last = end;
    }

    Some(grid)
}

#[cfg(test)]
mod tests {
    use super::{
        NumericTolerance, NumericTolerancePolicyError, compare_with_policy_tolerance, linear_grid,
        load_numeric_tolerance_policy,
    };
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn linear_grid_is_inclusive_and_rejects_invalid_counts() {
        assert_eq!(linear_grid(0.0, 1.0, 1), None);
        let grid = linear_grid(0.0, 2.0, 5).expect("grid");
        assert_eq!(grid, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn linear_grid_pins_last_point_to_end() {
        let end = 2.0 * std::f64::consts::PI;
        let grid = linear_grid(0.0, end, 16).expect("grid");
        assert_eq!(grid.len(), 16);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[15], end);
    }

    #[test]
    fn compare_with_policy_tolerance_uses_baseline_relative_scale() {
        let tolerance = NumericTolerance {
            abs_tol: 1.0e-9,
            rel_tol: 0.1,
            relative_floor: 1.0e-12,
        };
        let comparison = compare_with_policy_tolerance(2.0, 2.19, tolerance);
        assert!((comparison.abs_diff - 0.19).abs() < 1.0e-12);
        assert!((comparison.rel_diff - 0.095).abs() < 1.0e-12);
        assert!(comparison.passes);
    }

    #[test]
    fn load_numeric_tolerance_policy_reads_category_tolerance() {
        let temp = TempDir::new().expect("tempdir should be created");
        let policy_path = temp.path().join("policy.json");
        fs::write(
            &policy_path,
            r#"
            {
              "policyVersion": "1",
              "categories": [
                {
                  "id": "cross_section",
                  "tolerance": { "absTol": 1e-7, "relTol": 1e-3, "relativeFloor": 1e-12 }
                },
                { "id": "untoleranced" }
              ]
            }
            "#,
        )
        .expect("policy should be written");

        let policy = load_numeric_tolerance_policy(&policy_path).expect("policy should load");
        let tolerance = policy
            .tolerance_for_category("cross_section")
            .expect("cross_section tolerance should exist");

        assert_eq!(tolerance.abs_tol, 1.0e-7);
        assert_eq!(tolerance.rel_tol, 1.0e-3);
        assert_eq!(policy.tolerance_for_category("untoleranced"), None);
        assert_eq!(policy.tolerance_for_category("missing"), None);
    }

    #[test]
    fn load_numeric_tolerance_policy_separates_read_and_parse_failures() {
        let temp = TempDir::new().expect("tempdir should be created");

        let missing = load_numeric_tolerance_policy(temp.path().join("absent.json"))
            .expect_err("missing file should fail");
        assert!(matches!(missing, NumericTolerancePolicyError::Read { .. }));

        let malformed_path = temp.path().join("malformed.json");
        fs::write(&malformed_path, "{ not json").expect("file should be written");
        let malformed =
            load_numeric_tolerance_policy(&malformed_path).expect_err("malformed should fail");
        assert!(matches!(malformed, NumericTolerancePolicyError::Parse { .. }));
    }
}
