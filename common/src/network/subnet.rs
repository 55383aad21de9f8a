//! # Subnet Model
//!
//! Expands an IPv4 CIDR block into the ordered list of addresses it contains.
//!
//! The whole block is enumerated, network and broadcast addresses included.
//! Unusable addresses are left for the host to reject when they get provisioned.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ConfigError;

/// A well-formed IPv4 block, e.g. `9.1.1.0/30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    network: Ipv4Network,
}

impl Subnet {
    /// Creates a subnet from a base address and prefix length.
    ///
    /// The base address must be the network address of the block, the same
    /// way a strict CIDR parser would treat it.
    pub fn new(base_addr: Ipv4Addr, prefix: u8) -> Result<Self, ConfigError> {
        let network = Ipv4Network::new(base_addr, prefix).map_err(|e| ConfigError::InvalidSubnet {
            input: format!("{base_addr}/{prefix}"),
            reason: e.to_string(),
        })?;

        if network.network() != base_addr {
            return Err(ConfigError::InvalidSubnet {
                input: format!("{base_addr}/{prefix}"),
                reason: format!("host bits set, did you mean {}/{prefix}?", network.network()),
            });
        }

        Ok(Self { network })
    }

    pub fn network_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn broadcast_addr(&self) -> Ipv4Addr {
        self.network.broadcast()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// Number of addresses in the block, `2^(32 - prefix)`.
    pub fn len(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every address of the block in ascending numeric order, starting at the
    /// network address.
    pub fn addresses(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        let start: u32 = self.network_addr().into();
        let end: u32 = self.broadcast_addr().into();
        (start..=end).map(Ipv4Addr::from)
    }
}

impl FromStr for Subnet {
    type Err = ConfigError;

    /// Parses `a.b.c.d/prefix`. A bare address is taken as a `/32`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: String| ConfigError::InvalidSubnet {
            input: s.to_string(),
            reason,
        };

        let (addr_str, prefix_str) = s.split_once('/').unwrap_or((s, "32"));

        let base_addr = addr_str
            .parse::<Ipv4Addr>()
            .map_err(|e| invalid(format!("invalid address '{addr_str}': {e}")))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| invalid(format!("invalid prefix '{prefix_str}': {e}")))?;

        if prefix > 32 {
            return Err(invalid(format!("prefix {prefix} > 32")));
        }

        Self::new(base_addr, prefix)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_addr(), self.prefix())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
