//! Output formatting for the monitoring agent.
//!
//! - [`report`] - the `kea_dhcp` section and the formatter
//! - [`debug`] - the optional `kea_dhcp_debug` section

mod debug;
mod report;

pub use debug::debug_section;
pub use report::{report_rows, ReportFormatter, ReportRow, DEBUG_SECTION_HEADER, SECTION_HEADER};
