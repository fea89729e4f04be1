//! JSON configuration for the [`Analyzer`](crate::Analyzer).
//!
//! Every section is optional; missing fields fall back to the defaults of
//! the corresponding parameter struct.
//!
//! ```json
//! {
//!   "canny": { "min_threshold": 40, "max_threshold": 120, "kernel": "scharr" },
//!   "hough": { "radius": 12, "use_gradient": true },
//!   "kmeans": { "k": 6, "model": "hsv", "max_iterations": 20 },
//!   "histogram": { "bins": 180 }
//! }
//! ```
use crate::edges::CannyParams;
use crate::histogram::HistogramParams;
use crate::hough::HoughParams;
use crate::quantize::KMeansParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub canny: CannyParams,
    pub hough: HoughParams,
    pub kmeans: KMeansParams,
    pub histogram: HistogramParams,
}

impl AnalysisConfig {
    pub fn from_json_str(data: &str) -> Result<Self, String> {
        serde_json::from_str(data).map_err(|e| format!("Failed to parse config: {e}"))
    }

    /// Check every section's parameter ranges up front.
    pub fn validate(&self) -> Result<(), String> {
        self.canny.validate().map_err(|e| e.to_string())?;
        self.kmeans.validate().map_err(|e| e.to_string())?;
        if self.hough.radius == 0 {
            return Err("invalid parameter `radius`: must be positive".to_string());
        }
        if self.histogram.bins == 0 {
            return Err("invalid parameter `bins`: histogram needs at least one bin".to_string());
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<AnalysisConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
