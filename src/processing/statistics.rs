use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

/// Mean, median and mode of one group's values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
}

impl Summary {
    /// Reported for a group that has no valid values.
    pub const EMPTY: Summary = Summary {
        count: 0,
        mean: f64::NAN,
        median: f64::NAN,
        mode: f64::NAN,
    };

    /// Compute statistics from already-validated values. Values must not be NaN.
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::EMPTY;
        }

        let mut vals = values.to_vec();
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let count = vals.len();
        let mean = vals.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        } else {
            vals[count / 2]
        };

        Summary {
            count,
            mean,
            median,
            mode: mode_of_sorted(&vals),
        }
    }
}

/// Most frequent value of an ascending slice.
///
/// Equal values sit in one run after sorting, so the first run whose length strictly
/// exceeds every earlier run wins. Among tied counts the smallest value is returned.
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = (sorted[0], 0usize);
    let mut run = (sorted[0], 0usize);
    for &v in sorted {
        if v == run.0 {
            run.1 += 1;
        } else {
            run = (v, 1);
        }
        if run.1 > best.1 {
            best = run;
        }
    }
    best.0
}

/// Bucket values by group key, keeping record order inside each group.
///
/// Records without a key are skipped. A keyed record always registers its group, even
/// when `value` rejects it, so a group may end up with no values.
pub fn group_values<R, K, V>(records: &[R], key: K, value: V) -> BTreeMap<String, Vec<f64>>
where
    K: Fn(&R) -> Option<String>,
    V: Fn(&R) -> Option<f64>,
{
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut skipped = 0usize;
    for record in records {
        let Some(k) = key(record) else {
            skipped += 1;
            continue;
        };
        let bucket = groups.entry(k).or_default();
        if let Some(v) = value(record) {
            bucket.push(v);
        }
    }
    if skipped > 0 {
        tracing::debug!("Skipped {skipped} records without a group key");
    }
    groups
}

/// Per-group statistics as index-aligned sequences, ordered by ascending key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedStats {
    pub keys: Vec<String>,
    pub counts: Vec<usize>,
    pub mean: Vec<f64>,
    pub median: Vec<f64>,
    pub mode: Vec<f64>,
}

impl GroupedStats {
    pub fn from_groups(groups: &BTreeMap<String, Vec<f64>>) -> Self {
        let mut out = GroupedStats::default();
        // BTreeMap iterates keys in byte order, so "10" comes before "2".
        for (key, values) in groups {
            let summary = Summary::compute(values);
            out.keys.push(key.clone());
            out.counts.push(summary.count);
            out.mean.push(summary.mean);
            out.median.push(summary.median);
            out.mode.push(summary.mode);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn summary(&self, index: usize) -> Option<Summary> {
        Some(Summary {
            count: *self.counts.get(index)?,
            mean: *self.mean.get(index)?,
            median: *self.median.get(index)?,
            mode: *self.mode.get(index)?,
        })
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}

/// Group `records` by `key` and summarise the values picked out by `value`.
pub fn grouped_statistics<R, K, V>(records: &[R], key: K, value: V) -> GroupedStats
where
    K: Fn(&R) -> Option<String>,
    V: Fn(&R) -> Option<f64>,
{
    GroupedStats::from_groups(&group_values(records, key, value))
}
