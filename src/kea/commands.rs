//! Best-effort Kea commands. These never fail: errors are logged and
//! turned into "no data".

use super::client::{CommandApi, DEFAULT_SERVICE};
use super::response::{CommandResponse, Dhcp4Config};
use crate::models::value::is_truthy;
use colored::Colorize;
use serde_json::{json, Value};

/// `statistic-get-all` was renamed between Kea releases; both spellings are tried in order.
pub const STATISTICS_COMMANDS: [&str; 2] = ["statistic-get-all", "statistics-get-all"];
pub const CONFIG_COMMAND: &str = "config-get";
/// Key holding the DHCPv4 server configuration in `config-get` output.
pub const DHCP4_KEY: &str = "Dhcp4";

/// All statistics, or an empty list when neither command name works.
pub fn get_all_statistics(api: &impl CommandApi) -> Vec<CommandResponse> {
    let arguments = json!({});
    for command in STATISTICS_COMMANDS {
        match api.call(command, Some(&arguments), DEFAULT_SERVICE) {
            Ok(responses) => {
                log::info!("{command} returned {} item(s)", responses.len());
                return responses;
            }
            Err(e) => log::warn!("{failed} {command}: {e}", failed = "failed".on_red()),
        }
    }
    log::warn!("No statistics available, reporting from configuration only");
    Vec::new()
}

/// The first non-empty `Dhcp4` configuration, or an empty one.
pub fn fetch_configuration(api: &impl CommandApi) -> Dhcp4Config {
    let responses = match api.call(CONFIG_COMMAND, Some(&json!({})), DEFAULT_SERVICE) {
        Ok(responses) => responses,
        Err(e) => {
            log::warn!("{failed} {CONFIG_COMMAND}: {e}", failed = "failed".on_red());
            return Dhcp4Config::default();
        }
    };

    let Some(raw) = responses
        .iter()
        .filter_map(|r| r.arguments_map())
        .filter_map(|args| args.get(DHCP4_KEY))
        .find(|cfg| cfg.is_object() && is_truthy(cfg))
    else {
        log::warn!("{CONFIG_COMMAND} returned no {DHCP4_KEY} configuration");
        return Dhcp4Config::default();
    };

    decode_dhcp4(raw.clone()).unwrap_or_else(|e| {
        log::warn!("Ignoring {DHCP4_KEY} configuration: {e}");
        Dhcp4Config::default()
    })
}

fn decode_dhcp4(raw: Value) -> Result<Dhcp4Config, String> {
    serde_path_to_error::deserialize(raw)
        .map_err(|e| format!("path={} error={}", e.path(), e.inner()))
}
