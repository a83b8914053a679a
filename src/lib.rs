//! Per-group descriptive statistics (mean, median, mode) over tabular wine measurements.
//!
//! Records are bucketed by a class field, each tracked measure is coerced and filtered
//! per record, and every group is summarised into index-aligned sequences ordered by
//! the stringified class key.

pub mod config;
pub mod data;
pub mod error;
pub mod processing;
pub mod render;

pub use config::StatsConfig;
pub use data::loader::{load_file, Dataset};
pub use data::record::{FieldValue, Record};
pub use error::{Result, StatsError};
pub use processing::measure::{Measure, MeasureStats, StatsReport};
pub use processing::statistics::{group_values, grouped_statistics, GroupedStats, Summary};
