//! Kea Control Agent interaction.
//!
//! - [`client`] - JSON command transport
//! - [`commands`] - statistics and configuration retrieval
//! - [`response`] - typed response and configuration shapes

mod client;
mod commands;
mod response;

// Re-export public types and functions
pub use client::{decode_responses, ApiClient, CommandApi, DEFAULT_SERVICE};
pub use commands::{
    fetch_configuration, get_all_statistics, CONFIG_COMMAND, DHCP4_KEY, STATISTICS_COMMANDS,
};
pub use response::{
    CommandResponse, Dhcp4Config, GlobalReservation, PoolConfig, SharedNetworkConfig,
    SubnetConfig, UNKNOWN_SUBNET,
};
