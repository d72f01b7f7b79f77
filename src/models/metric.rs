//! Metric observations pulled out of statistics responses.

use itertools::Itertools;

/// Lines of the debug section before the remainder is summarised.
pub const SEEN_NAMES_LIMIT: usize = 300;

/// The per-subnet counter a metric feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Used,
    Total,
    Declined,
    Reservations,
}

impl Bucket {
    /// Classify the metric part of a `subnet[<id>].<metric>` name.
    pub fn from_metric(metric: &str) -> Option<Bucket> {
        let metric = metric.to_lowercase();
        match metric.as_str() {
            "assigned-addresses" | "leases-assigned" | "total-leases" | "addresses_assigned" => {
                Some(Bucket::Used)
            }
            "total-addresses" | "addresses_total" | "total_addresses" => Some(Bucket::Total),
            m if m.contains("declined") => Some(Bucket::Declined),
            m if m.contains("reservation") => Some(Bucket::Reservations),
            _ => None,
        }
    }

    /// Looser classification for entries that carry an explicit subnet id.
    pub fn from_tagged_name(name: &str) -> Option<Bucket> {
        let name = name.to_lowercase();
        if name.contains("assigned") {
            Some(Bucket::Used)
        } else if name.contains("total-addresses") || name.contains("addresses_total") {
            Some(Bucket::Total)
        } else if name.contains("reservation") {
            Some(Bucket::Reservations)
        } else {
            None
        }
    }
}

/// One `(subnet, metric, value)` sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricObservation {
    pub subnet_id: String,
    pub metric: String,
    pub bucket: Bucket,
    pub value: u64,
}

/// Every raw metric name met during extraction, in encounter order.
#[derive(Debug, Clone, Default)]
pub struct SeenNames {
    names: Vec<String>,
}

impl SeenNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    /// Number of names recorded, duplicates included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Distinct names in first-seen order.
    pub fn unique(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).unique().collect()
    }

    /// At most `limit` distinct names plus how many were left out.
    pub fn truncated(&self, limit: usize) -> (Vec<&str>, usize) {
        let mut unique = self.unique();
        let rest = unique.len().saturating_sub(limit);
        unique.truncate(limit);
        (unique, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_metric_exact_sets() {
        for m in ["assigned-addresses", "leases-assigned", "total-leases", "addresses_assigned"] {
            assert_eq!(Bucket::from_metric(m), Some(Bucket::Used), "{m}");
        }
        for m in ["total-addresses", "addresses_total", "TOTAL_ADDRESSES"] {
            assert_eq!(Bucket::from_metric(m), Some(Bucket::Total), "{m}");
        }
        assert_eq!(Bucket::from_metric("cumulative-assigned-addresses"), None);
    }

    #[test]
    fn test_from_metric_substrings() {
        assert_eq!(
            Bucket::from_metric("declined-addresses"),
            Some(Bucket::Declined)
        );
        assert_eq!(
            Bucket::from_metric("reclaimed-declined-addresses"),
            Some(Bucket::Declined)
        );
        assert_eq!(
            Bucket::from_metric("reservations-in-use"),
            Some(Bucket::Reservations)
        );
        assert_eq!(Bucket::from_metric("pkt4-received"), None);
    }

    #[test]
    fn test_from_tagged_name() {
        assert_eq!(
            Bucket::from_tagged_name("cumulative-assigned-addresses"),
            Some(Bucket::Used)
        );
        assert_eq!(
            Bucket::from_tagged_name("Total-Addresses"),
            Some(Bucket::Total)
        );
        assert_eq!(
            Bucket::from_tagged_name("reservations"),
            Some(Bucket::Reservations)
        );
        assert_eq!(Bucket::from_tagged_name("declined-addresses"), None);
    }

    #[test]
    fn test_seen_names_unique_keeps_first_order() {
        let mut seen = SeenNames::new();
        for n in ["b", "a", "b", "c", "a"] {
            seen.record(n);
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(seen.unique(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_seen_names_truncated() {
        let mut seen = SeenNames::new();
        for i in 0..310 {
            seen.record(&format!("name-{i}"));
        }
        seen.record("name-0");
        let (shown, rest) = seen.truncated(SEEN_NAMES_LIMIT);
        assert_eq!(shown.len(), 300);
        assert_eq!(shown[0], "name-0");
        assert_eq!(shown[299], "name-299");
        assert_eq!(rest, 10);
    }
}
