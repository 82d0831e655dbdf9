//! IPv4 address values.
//!
//! An [`Address`] is a plain 32-bit value. Every bitwise or arithmetic
//! operation returns a new address; nothing mutates in place.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of bits in an IPv4 address
pub const ADDRESS_BITS: u32 = 32;

/// Number of dot-separated components in dotted-decimal notation
const OCTET_COUNT: usize = 4;

/// Errors raised while parsing dotted-decimal addresses or CIDR strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("address '{input}' is not in the format a.b.c.d ({found} components)")]
    ComponentCount { input: String, found: usize },

    #[error("'{component}' is not a valid address component")]
    InvalidComponent { component: String },

    #[error("octet {value} is out of range 0-255")]
    OctetOutOfRange { value: u32 },

    #[error("network '{input}' is not in the format a.b.c.d/x")]
    MissingPrefix { input: String },

    #[error("'{prefix}' is not a valid prefix length")]
    InvalidPrefix { prefix: String },

    #[error("prefix length {prefix} is out of range 0-32")]
    PrefixOutOfRange { prefix: u8 },
}

/// A 32-bit IPv4 address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u32);

impl Address {
    pub const ZERO: Address = Address(0);
    pub const BROADCAST: Address = Address(u32::MAX);

    pub const fn new(value: u32) -> Self {
        Address(value)
    }

    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Address(u32::from_be_bytes(octets))
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Bitwise AND with a raw 32-bit value
    pub const fn and(self, mask: u32) -> Self {
        Address(self.0 & mask)
    }

    /// Bitwise OR with a raw 32-bit value
    pub const fn or(self, bits: u32) -> Self {
        Address(self.0 | bits)
    }

    /// Integer addition, wrapping past 255.255.255.255.
    ///
    /// Callers that must not wrap use [`Address::checked_add`].
    pub const fn add(self, offset: u32) -> Self {
        Address(self.0.wrapping_add(offset))
    }

    /// Integer addition that fails instead of leaving the address space
    pub fn checked_add(self, offset: u64) -> Option<Self> {
        let sum = u64::from(self.0).checked_add(offset)?;
        u32::try_from(sum).ok().map(Address)
    }

    pub const fn and_address(self, other: Address) -> Self {
        self.and(other.0)
    }

    pub const fn or_address(self, other: Address) -> Self {
        self.or(other.0)
    }

    pub const fn add_address(self, other: Address) -> Self {
        self.add(other.0)
    }

    /// Parse a dotted-decimal string such as `192.168.0.1`.
    ///
    /// Exactly four components are required and each must be an integer
    /// in the range 0-255.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let components: Vec<&str> = text.split('.').collect();
        if components.len() != OCTET_COUNT {
            return Err(FormatError::ComponentCount {
                input: text.to_string(),
                found: components.len(),
            });
        }

        let mut value = 0u32;
        for component in components {
            let octet: u32 = component.parse().map_err(|_| FormatError::InvalidComponent {
                component: component.to_string(),
            })?;
            if octet > u32::from(u8::MAX) {
                return Err(FormatError::OctetOutOfRange { value: octet });
            }
            value = (value << 8) | octet;
        }

        Ok(Address(value))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for Address {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address(value)
    }
}

impl From<Address> for u32 {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address(u32::from(ip))
    }
}

impl From<Address> for Ipv4Addr {
    fn from(address: Address) -> Self {
        Ipv4Addr::from(address.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
