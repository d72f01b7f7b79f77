//! Kea DHCP pool utilisation summary for a Checkmk agent plugin.
//!
//! Statistics and configuration are pulled from the Kea Control Agent,
//! merged into one record per subnet and printed as the `kea_dhcp` section.

pub mod config;
pub mod kea;
pub mod models;
pub mod output;
pub mod processing;

use config::Config;
use kea::{
    fetch_configuration, get_all_statistics, ApiClient, CommandApi, CommandResponse, Dhcp4Config,
};
use models::{SeenNames, SubnetTable};
use output::ReportFormatter;
use processing::{extract_statistics, reconcile_configuration};

/// Per-subnet records plus every statistic name seen on the way.
#[derive(Debug, Default)]
pub struct Summary {
    pub table: SubnetTable,
    pub seen: SeenNames,
}

/// Merge the two raw inputs. Pure: no I/O, no environment.
pub fn aggregate(statistics: &[CommandResponse], configuration: &Dhcp4Config) -> Summary {
    let mut summary = Summary::default();
    extract_statistics(statistics, &mut summary.table, &mut summary.seen);
    reconcile_configuration(configuration, &mut summary.table);
    summary
}

/// Fetch statistics and configuration from `api` and aggregate them.
pub fn collect_summary(api: &impl CommandApi) -> Summary {
    let statistics = get_all_statistics(api);
    let configuration = fetch_configuration(api);
    aggregate(&statistics, &configuration)
}

/// The complete agent output. Never fails; without data it is the section header alone.
pub fn collect_report(config: &Config) -> String {
    log::info!("#Start collect_report() url={}", config.api_url);
    let summary = match ApiClient::new(config) {
        Ok(client) => collect_summary(&client),
        Err(e) => {
            log::warn!("Kea API client unavailable: {e}");
            Summary::default()
        }
    };
    ReportFormatter::new(config).render(&summary.table, &summary.seen)
}
