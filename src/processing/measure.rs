use serde::{Deserialize, Serialize};

use crate::config::StatsConfig;
use crate::data::record::Record;
use crate::processing::statistics::{grouped_statistics, GroupedStats};

/// A tracked measurement: either read straight from a field or derived from several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Measure {
    /// Invalid values are left out of the group.
    Field { label: String, field: String },
    /// Product of `numerator` fields divided by `denominator`. Any invalid input yields 0,
    /// as does 0/0. A zero denominator otherwise gives an infinite value.
    Ratio {
        label: String,
        numerator: Vec<String>,
        denominator: String,
    },
}

impl Measure {
    pub fn field(label: &str, field: &str) -> Self {
        Measure::Field {
            label: label.to_string(),
            field: field.to_string(),
        }
    }

    pub fn ratio(label: &str, numerator: &[&str], denominator: &str) -> Self {
        Measure::Ratio {
            label: label.to_string(),
            numerator: numerator.iter().map(|s| s.to_string()).collect(),
            denominator: denominator.to_string(),
        }
    }

    /// Flavanoids and Gamma (Ash * Hue / Magnesium).
    pub fn defaults() -> Vec<Measure> {
        vec![
            Measure::field("Flavanoids", "Flavanoids"),
            Measure::ratio("Gamma", &["Ash", "Hue"], "Magnesium"),
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Measure::Field { label, .. } | Measure::Ratio { label, .. } => label,
        }
    }

    /// Value this record contributes to its group, or `None` to contribute nothing.
    pub fn extract(&self, record: &Record) -> Option<f64> {
        match self {
            Measure::Field { field, .. } => record.number(field),
            Measure::Ratio {
                numerator,
                denominator,
                ..
            } => Some(ratio_or_zero(record, numerator, denominator)),
        }
    }
}

fn ratio_or_zero(record: &Record, numerator: &[String], denominator: &str) -> f64 {
    let product = numerator
        .iter()
        .try_fold(1.0, |acc, f| record.number(f).map(|v| acc * v));
    match (product, record.number(denominator)) {
        (Some(p), Some(d)) => {
            let q = p / d;
            // NaN would break the ascending sort
            if q.is_nan() {
                0.0
            } else {
                q
            }
        }
        _ => 0.0,
    }
}

/// Grouped statistics for one measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureStats {
    pub label: String,
    pub stats: GroupedStats,
}

/// Statistics for every configured measure over one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub group_by: String,
    pub keys: Vec<String>,
    pub measures: Vec<MeasureStats>,
}

impl StatsReport {
    pub fn build(records: &[Record], config: &StatsConfig) -> Self {
        let group_key = |r: &Record| r.get(&config.group_by).and_then(|v| v.group_key());
        let measures: Vec<MeasureStats> = config
            .measures
            .iter()
            .map(|m| MeasureStats {
                label: m.label().to_string(),
                stats: grouped_statistics(records, group_key, |r| m.extract(r)),
            })
            .collect();

        // Every measure registers the same keyed records, so the key sets agree.
        let keys = match measures.first() {
            Some(m) => m.stats.keys.clone(),
            None => grouped_statistics(records, group_key, |_| None).keys,
        };
        tracing::debug!(
            "Computed {} measures over {} groups of '{}'",
            measures.len(),
            keys.len(),
            config.group_by
        );

        StatsReport {
            group_by: config.group_by.clone(),
            keys,
            measures,
        }
    }
}
