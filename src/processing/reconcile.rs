//! Configuration reconciliation.
//!
//! Folds the static `Dhcp4` configuration into the statistics accumulator:
//! pool capacity, CIDR and reservation counts.

use crate::kea::{Dhcp4Config, SubnetConfig};
use crate::models::{pool_size, SubnetTable};

/// Sum of all pool sizes of a subnet. Malformed pools count as 0.
pub fn subnet_capacity(subnet: &SubnetConfig) -> u64 {
    subnet
        .pools
        .iter()
        .filter_map(|p| {
            let range = p.range();
            if let (None, Some(other)) = (range, &p.pool) {
                log::warn!("subnet[{}] pool is not a range string: {other}", subnet.key());
            }
            range
        })
        .map(pool_size)
        .sum()
}

/// Merge `config` into `table`.
///
/// - `total` is only set when statistics did not already provide one
/// - `cidr` is always taken from the configuration
/// - per-subnet and global reservations are added to any existing count
pub fn reconcile_configuration(config: &Dhcp4Config, table: &mut SubnetTable) {
    for network in &config.shared_networks {
        log::debug!(
            "shared network {:?}: {} subnet(s)",
            network.name(),
            network.subnets.len()
        );
    }

    let mut subnet_count = 0;
    for subnet in config.all_subnets() {
        let id = subnet.key();
        let capacity = subnet_capacity(subnet);
        let record = table.entry(&id);

        if record.total.is_none() {
            record.total = Some(capacity);
        }
        record.cidr = Some(subnet.cidr().to_string());
        if !subnet.reservations.is_empty() {
            record.add_reservations(subnet.reservations.len() as u64);
        }
        log::debug!(
            "subnet[{id}] cidr={} pools={} capacity={capacity} reservations={}",
            record.cidr(),
            subnet.pools.len(),
            subnet.reservations.len()
        );
        subnet_count += 1;
    }

    let mut global_count = 0;
    for reservation in &config.reservations {
        match reservation.subnet_id() {
            Some(id) => {
                table.entry(&id).add_reservations(1);
                global_count += 1;
            }
            None => log::trace!("global reservation without subnet id: {:?}", reservation.fields),
        }
    }

    log::info!(
        "reconcile_configuration: {subnet_count} subnet(s), {global_count}/{} global reservation(s)",
        config.reservations.len()
    );
}
