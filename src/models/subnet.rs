//! Per-subnet accumulator shared by the statistics and configuration passes.

use super::Bucket;
use std::collections::HashMap;

/// Sort key for ids that are not plain integers, e.g. `unknown`.
/// Above every 32-bit Kea subnet id.
pub const NON_NUMERIC_ORDER: u64 = u64::MAX;

/// What is known about one subnet. `None` means no source has set the field yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubnetRecord {
    pub cidr: Option<String>,
    pub total: Option<u64>,
    pub used: Option<u64>,
    pub declined: Option<u64>,
    pub reservations: Option<u64>,
}

impl SubnetRecord {
    /// Overwrite the counter for `bucket`.
    pub fn put(&mut self, bucket: Bucket, value: u64) {
        let slot = match bucket {
            Bucket::Used => &mut self.used,
            Bucket::Total => &mut self.total,
            Bucket::Declined => &mut self.declined,
            Bucket::Reservations => &mut self.reservations,
        };
        *slot = Some(value);
    }

    /// Add to the reservation count, starting from 0 when unset.
    pub fn add_reservations(&mut self, count: u64) {
        self.reservations = Some(self.reservations() + count);
    }

    pub fn cidr(&self) -> &str {
        self.cidr.as_deref().unwrap_or("")
    }

    pub fn total(&self) -> u64 {
        self.total.unwrap_or(0)
    }

    pub fn used(&self) -> u64 {
        self.used.unwrap_or(0)
    }

    pub fn declined(&self) -> u64 {
        self.declined.unwrap_or(0)
    }

    pub fn reservations(&self) -> u64 {
        self.reservations.unwrap_or(0)
    }

    /// Free addresses. Always 0 for a subnet with unknown capacity.
    pub fn free(&self) -> u64 {
        if self.total() > 0 {
            self.total().saturating_sub(self.used())
        } else {
            0
        }
    }

    /// A record worth reporting. `declined` alone does not count.
    pub fn is_reportable(&self) -> bool {
        !self.cidr().is_empty() || self.total() > 0 || self.used() > 0 || self.reservations() > 0
    }
}

/// Subnet records keyed by id, remembering first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct SubnetTable {
    records: Vec<(String, SubnetRecord)>,
    index: HashMap<String, usize>,
}

impl SubnetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `id`, inserting an empty one on first use.
    pub fn entry(&mut self, id: &str) -> &mut SubnetRecord {
        let pos = match self.index.get(id) {
            Some(pos) => *pos,
            None => {
                self.records.push((id.to_string(), SubnetRecord::default()));
                self.index.insert(id.to_string(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        &mut self.records[pos].1
    }

    pub fn get(&self, id: &str) -> Option<&SubnetRecord> {
        self.index.get(id).map(|pos| &self.records[*pos].1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubnetRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }

    /// Records ordered by numeric id; non-numeric ids last, in insertion order.
    pub fn sorted(&self) -> Vec<(&str, &SubnetRecord)> {
        let mut rows: Vec<(&str, &SubnetRecord)> = self.iter().collect();
        rows.sort_by_key(|(id, _)| order_key(id));
        rows
    }
}

/// Numeric value of an all-digit id, else [`NON_NUMERIC_ORDER`].
pub fn order_key(id: &str) -> u64 {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        id.parse().unwrap_or(NON_NUMERIC_ORDER)
    } else {
        NON_NUMERIC_ORDER
    }
}
