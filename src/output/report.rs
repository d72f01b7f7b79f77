//! Checkmk agent section for the Kea DHCP summary.
//!
//! ```text
//! <<<kea_dhcp:sep(0)>>>
//! subnet_id;cidr;total;used;free;reservations
//! ```

use super::debug::debug_section;
use crate::config::Config;
use crate::models::{SeenNames, SubnetRecord, SubnetTable, SEEN_NAMES_LIMIT};
use std::fmt;

pub const SECTION_HEADER: &str = "<<<kea_dhcp:sep(0)>>>";
pub const DEBUG_SECTION_HEADER: &str = "<<<kea_dhcp_debug:sep(0)>>>";

/// One data line of the `kea_dhcp` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub subnet_id: String,
    pub cidr: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub reservations: u64,
}

impl ReportRow {
    pub fn new(subnet_id: &str, record: &SubnetRecord) -> Self {
        ReportRow {
            subnet_id: subnet_id.to_string(),
            cidr: record.cidr().to_string(),
            total: record.total(),
            used: record.used(),
            free: record.free(),
            reservations: record.reservations(),
        }
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{}",
            self.subnet_id, self.cidr, self.total, self.used, self.free, self.reservations
        )
    }
}

/// Reportable subnets in output order.
pub fn report_rows(table: &SubnetTable) -> Vec<ReportRow> {
    table
        .sorted()
        .into_iter()
        .filter(|(_, record)| record.is_reportable())
        .map(|(id, record)| ReportRow::new(id, record))
        .collect()
}

/// Renders the agent output.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    debug: bool,
    seen_limit: usize,
}

impl ReportFormatter {
    pub fn new(config: &Config) -> Self {
        ReportFormatter {
            debug: config.debug,
            seen_limit: SEEN_NAMES_LIMIT,
        }
    }

    /// Full agent output, one `\n`-terminated line per entry.
    pub fn render(&self, table: &SubnetTable, seen: &SeenNames) -> String {
        let rows = report_rows(table);
        log::info!(
            "render: {} of {} subnet(s) reportable",
            rows.len(),
            table.len()
        );

        let mut lines = vec![SECTION_HEADER.to_string()];
        lines.extend(rows.iter().map(ReportRow::to_string));
        if self.debug {
            lines.push(DEBUG_SECTION_HEADER.to_string());
            lines.extend(debug_section(seen, self.seen_limit));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
