//! IPv4 pool range arithmetic.
//!
//! Kea declares pools as `"start - end"` strings. [`PoolRange`] parses them
//! and [`pool_size`] turns one into an address count without ever failing.

use std::error::Error;
use std::net::Ipv4Addr;

/// Parse a dotted quad. Octets may carry leading zeros (`010.0.0.1`).
pub fn parse_dotted_quad(addr: &str) -> Result<Ipv4Addr, Box<dyn Error>> {
    let octets = addr
        .trim()
        .split('.')
        .map(|o| o.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("Invalid address {addr:?}: {e}"))?;
    match octets.as_slice() {
        [a, b, c, d] => Ok(Ipv4Addr::new(*a, *b, *c, *d)),
        _ => Err(format!("Invalid address {addr:?}: expected 4 octets").into()),
    }
}

/// Inclusive address range of a DHCP pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
}

impl PoolRange {
    /// Parse `"10.0.0.10 - 10.0.0.200"`. Splits on the first hyphen only.
    pub fn new(range: &str) -> Result<PoolRange, Box<dyn Error>> {
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| format!("Pool {range:?} is not a start-end range"))?;
        Ok(PoolRange {
            start: parse_dotted_quad(start)?,
            end: parse_dotted_quad(end)?,
        })
    }

    /// Number of addresses in the range, 0 when `end < start`.
    pub fn size(&self) -> u64 {
        let lo = u32::from(self.start) as u64;
        let hi = u32::from(self.end) as u64;
        (hi + 1).saturating_sub(lo)
    }
}

impl std::fmt::Display for PoolRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Size of a pool string. Anything that is not a numeric IPv4 range counts as 0.
pub fn pool_size(range: &str) -> u64 {
    match PoolRange::new(range) {
        Ok(pool) => {
            log::trace!("pool {pool} size={}", pool.size());
            pool.size()
        }
        Err(e) => {
            if range.contains('-') {
                log::warn!("Ignoring pool: {e}");
            } else {
                log::debug!("Ignoring pool: {e}");
            }
            0
        }
    }
}
