//! VLSM allocation planning.
//!
//! This module takes a parent network and a list of named host-count
//! requirements and either places every requirement in its own subnet or
//! reports that the set does not fit.

pub mod types;
pub mod allocator;

// Re-export key types and functions for easier access
pub use types::{AllocationRecord, AllocationResult, InfeasibleReason, PlanError, Requirement};
pub use allocator::{host_bits, plan, required_addresses, subnet_size};
