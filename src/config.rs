use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::processing::measure::Measure;

pub const DEFAULT_GROUP_BY: &str = "Alcohol";
pub const DEFAULT_PRECISION: usize = 3;

/// What to group by, which measures to summarise and how to print them.
///
/// Every key is optional in the TOML file:
///
/// ```toml
/// group_by = "Alcohol"
/// precision = 3
///
/// [[measures]]
/// kind = "field"
/// label = "Flavanoids"
/// field = "Flavanoids"
///
/// [[measures]]
/// kind = "ratio"
/// label = "Gamma"
/// numerator = ["Ash", "Hue"]
/// denominator = "Magnesium"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub group_by: String,
    pub precision: usize,
    pub measures: Vec<Measure>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            group_by: DEFAULT_GROUP_BY.to_string(),
            precision: DEFAULT_PRECISION,
            measures: Measure::defaults(),
        }
    }
}

impl StatsConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }
}
