//! Domain models for the Kea DHCP summary.
//!
//! - [`SubnetRecord`] and [`SubnetTable`] - per-subnet accumulator
//! - [`Bucket`], [`MetricObservation`], [`SeenNames`] - statistics extraction
//! - [`pool_size`] - IPv4 pool range arithmetic
//! - [`value`] - coercion of loosely typed JSON fields

mod ipv4;
mod metric;
mod subnet;
pub mod value;

// Re-export public types
pub use ipv4::{parse_dotted_quad, pool_size, PoolRange};
pub use metric::{Bucket, MetricObservation, SeenNames, SEEN_NAMES_LIMIT};
pub use subnet::{order_key, SubnetRecord, SubnetTable, NON_NUMERIC_ORDER};
