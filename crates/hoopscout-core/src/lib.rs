// Library root: record store, merge engine, derived metrics, and the view
// models built on top of them.

pub mod config;
pub mod merge;
pub mod metrics;
pub mod profile;
pub mod records;
pub mod reports;
pub mod roster;
pub mod schema;
