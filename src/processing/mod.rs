//! Subnet data processing logic.
//!
//! - [`statistics`] - per-subnet counters from `statistic-get-all`
//! - [`reconcile`] - capacity, CIDR and reservations from `config-get`

mod reconcile;
mod statistics;

// Re-export public functions
pub use reconcile::{reconcile_configuration, subnet_capacity};
pub use statistics::{
    extract_statistics, latest_sample, observations, split_subnet_metric, StatsParser, GROUP_KEYS,
};
