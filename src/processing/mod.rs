pub mod measure;
pub mod statistics;
