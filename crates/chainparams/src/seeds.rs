//! Fixed bootstrap seeds
//!
//! Seeds are compiled in as raw (IPv6 address, port) pairs. Converting them
//! stamps each one with a synthetic "last seen" time one to two weeks in the
//! past: a node only needs one or two seeds to connect, after which peer
//! exchange hands it fresher addresses.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::net::{Ipv6Addr, SocketAddr};

/// One week in seconds
pub const ONE_WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Compiled-in seed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec {
    /// IPv6 address bytes (IPv4 addresses are IPv4-mapped)
    pub addr: [u8; 16],
    /// Port
    pub port: u16,
}

impl SeedSpec {
    /// Seed entry for an IPv4 address
    pub const fn ipv4(a: u8, b: u8, c: u8, d: u8, port: u16) -> Self {
        Self {
            addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
            port,
        }
    }
}

/// Bootstrap address with a synthetic last-seen time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAddress {
    /// Address
    pub ip: Ipv6Addr,
    /// Port
    pub port: u16,
    /// Synthetic last-seen time
    pub last_seen: DateTime<Utc>,
}

impl SeedAddress {
    /// Socket address, unmapping IPv4-mapped addresses
    pub fn socket_addr(&self) -> SocketAddr {
        match self.ip.to_ipv4_mapped() {
            Some(v4) => SocketAddr::new(v4.into(), self.port),
            None => SocketAddr::new(self.ip.into(), self.port),
        }
    }
}

/// Mainnet fixed seeds
pub const MAIN_SEEDS: &[SeedSpec] = &[
    SeedSpec::ipv4(192, 0, 2, 17, 16969),
    SeedSpec::ipv4(192, 0, 2, 69, 16969),
    SeedSpec::ipv4(198, 51, 100, 23, 16969),
    SeedSpec::ipv4(203, 0, 113, 42, 16969),
];

/// Testnet fixed seeds
pub const TEST_SEEDS: &[SeedSpec] = &[SeedSpec::ipv4(198, 51, 100, 96, 26969)];

/// Convert a seed table, keeping its order.
///
/// Each entry gets an independently drawn last-seen time in
/// `(now - 2 weeks, now - 1 week]`.
pub fn convert_seeds<R: Rng + ?Sized>(
    specs: &[SeedSpec],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SeedAddress> {
    specs
        .iter()
        .map(|spec| {
            let jitter = rng.gen_range(0..ONE_WEEK_SECS) + ONE_WEEK_SECS;
            SeedAddress {
                ip: Ipv6Addr::from(spec.addr),
                port: spec.port,
                last_seen: now - Duration::seconds(jitter),
            }
        })
        .collect()
}

/// Convert a seed table against the wall clock.
pub fn convert_seeds_now(specs: &[SeedSpec]) -> Vec<SeedAddress> {
    convert_seeds(specs, Utc::now(), &mut rand::thread_rng())
}
