//! CIDR networks.
//!
//! A [`CidrNetwork`] pairs an arbitrary base address with a prefix length.
//! The base address does not have to be the network address; every derived
//! quantity normalizes it by masking the host bits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::address::{Address, FormatError, ADDRESS_BITS};

/// Longest valid prefix length
pub const MAX_PREFIX: u8 = 32;

/// An IPv4 network in `address/prefix` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrNetwork {
    base_address: Address,
    prefix_length: u8,
}

impl CidrNetwork {
    pub fn new(base_address: Address, prefix_length: u8) -> Result<Self, FormatError> {
        if prefix_length > MAX_PREFIX {
            return Err(FormatError::PrefixOutOfRange { prefix: prefix_length });
        }
        Ok(CidrNetwork { base_address, prefix_length })
    }

    /// Block of `2^host_bits` addresses starting at `base_address`.
    ///
    /// Returns `None` when `host_bits` exceeds the address width.
    pub fn from_host_bits(base_address: Address, host_bits: u32) -> Option<Self> {
        let prefix_length = ADDRESS_BITS.checked_sub(host_bits)?;
        Some(CidrNetwork { base_address, prefix_length: prefix_length as u8 })
    }

    /// Parse `a.b.c.d/prefix`; exactly one `/` is allowed
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let parts: Vec<&str> = text.split('/').collect();
        if parts.len() != 2 {
            return Err(FormatError::MissingPrefix { input: text.to_string() });
        }

        let base_address = Address::parse(parts[0])?;
        let prefix_length: u8 = parts[1].parse().map_err(|_| FormatError::InvalidPrefix {
            prefix: parts[1].to_string(),
        })?;

        CidrNetwork::new(base_address, prefix_length)
    }

    pub fn base_address(&self) -> Address {
        self.base_address
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    fn host_bits(&self) -> u32 {
        ADDRESS_BITS - u32::from(self.prefix_length)
    }

    /// Mask with the network bits set
    pub fn netmask(&self) -> u32 {
        u32::MAX.checked_shl(self.host_bits()).unwrap_or(0)
    }

    /// Mask with the host bits set
    pub fn hostmask(&self) -> u32 {
        !self.netmask()
    }

    /// Base address with every host bit cleared
    pub fn network_address(&self) -> Address {
        self.base_address.and(self.netmask())
    }

    /// Base address with every host bit set
    pub fn broadcast_address(&self) -> Address {
        self.base_address.or(self.hostmask())
    }

    /// `2^(32 - prefix)`; /0 holds 2^32 addresses, hence `u64`
    pub fn total_addresses(&self) -> u64 {
        1u64 << self.host_bits()
    }

    /// Total addresses minus the network and broadcast addresses.
    ///
    /// /31 and /32 have no meaningful host range here and report 0.
    pub fn allocatable_addresses(&self) -> u64 {
        self.total_addresses().saturating_sub(2)
    }

    pub fn contains(&self, address: Address) -> bool {
        self.network_address() <= address && address <= self.broadcast_address()
    }

    /// True when the whole of `other` lies inside this network
    pub fn contains_network(&self, other: &CidrNetwork) -> bool {
        self.contains(other.network_address()) && self.contains(other.broadcast_address())
    }

    /// Whether the two address ranges share at least one address
    pub fn overlaps(&self, other: &CidrNetwork) -> bool {
        self.network_address() <= other.broadcast_address()
            && other.network_address() <= self.broadcast_address()
    }

    pub fn is_network_address(&self) -> bool {
        self.base_address == self.network_address()
    }

    /// Same prefix, base address replaced by the network address
    pub fn normalized(&self) -> CidrNetwork {
        CidrNetwork {
            base_address: self.network_address(),
            prefix_length: self.prefix_length,
        }
    }

    /// First usable host address; `None` for /31 and /32
    pub fn first_host(&self) -> Option<Address> {
        (self.prefix_length < 31).then(|| self.network_address().add(1))
    }

    /// Last usable host address; `None` for /31 and /32
    pub fn last_host(&self) -> Option<Address> {
        (self.prefix_length < 31).then(|| Address::new(self.broadcast_address().value() - 1))
    }
}

impl fmt::Display for CidrNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_address, self.prefix_length)
    }
}

impl FromStr for CidrNetwork {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CidrNetwork::parse(s)
    }
}

impl Serialize for CidrNetwork {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CidrNetwork {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
