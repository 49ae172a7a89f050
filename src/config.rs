//! Stage configuration: layout constants, dataset sources, training defaults.
//!
//! Loaded from a JSON file when `--config` is given, otherwise defaults
//! matching the stock teaching setup are used.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named CSV dataset offered in the source select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    pub url: String,
}

impl DatasetSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Tunables for the teaching stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Fraction of the viewport width reserved for the left tab strip.
    pub left_tab_width_ratio: f32,
    /// Logical sub-canvases (tabs) the headless host creates.
    pub sub_canvas_count: usize,
    /// Datasets offered in the source select, in display order.
    pub dataset_sources: Vec<DatasetSource>,
    pub train_epochs: usize,
    /// 0 = train on the full dataset in one batch.
    pub train_batch_size: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            left_tab_width_ratio: 0.2,
            sub_canvas_count: 2,
            dataset_sources: vec![
                DatasetSource::new(
                    "Binary classification",
                    "datasets/binary_classification_data.csv",
                ),
                DatasetSource::new("Regression", "datasets/regression_data.csv"),
                DatasetSource::new(
                    "Boston housing",
                    "https://storage.googleapis.com/tfjs-examples/multivariate-linear-regression/data/boston-housing-train.csv",
                ),
            ],
            train_epochs: 100,
            train_batch_size: 0,
        }
    }
}

impl StageConfig {
    pub fn from_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
