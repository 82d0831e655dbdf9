//! IPv4 address arithmetic and CIDR networks.
//!
//! These are the shared leaf types used by both the allocation planner and
//! the instance generator.

pub mod address;
pub mod network;

// Re-export commonly used types
pub use address::{Address, FormatError, ADDRESS_BITS};
pub use network::{CidrNetwork, MAX_PREFIX};
