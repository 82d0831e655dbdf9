//! Planner input and output types.

use serde::{Deserialize, Serialize};

use crate::ip::CidrNetwork;

/// A named host-count requirement for one subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub host_count: u64,
}

impl Requirement {
    pub fn new(id: impl Into<String>, host_count: u64) -> Self {
        Requirement { id: id.into(), host_count }
    }
}

/// One placed subnet of a successful plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub requirement_id: String,
    pub host_count: u64,
    pub subnet: CidrNetwork,
}

/// Why a requirement set could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfeasibleReason {
    #[error("subnet for {requirement_id} ({host_count} hosts) needs {required} addresses but only {available} remain")]
    OutOfSpace {
        requirement_id: String,
        host_count: u64,
        required: u64,
        available: u64,
    },

    #[error("{requirement_id} asks for {host_count} hosts, more than any IPv4 subnet holds")]
    SubnetTooLarge { requirement_id: String, host_count: u64 },
}

/// Outcome of a plan; infeasibility is an ordinary result, not an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AllocationResult {
    Feasible { records: Vec<AllocationRecord> },
    Infeasible { reason: InfeasibleReason },
}

impl AllocationResult {
    pub fn is_feasible(&self) -> bool {
        matches!(self, AllocationResult::Feasible { .. })
    }

    /// Placed records, empty for an infeasible plan
    pub fn records(&self) -> &[AllocationRecord] {
        match self {
            AllocationResult::Feasible { records } => records,
            AllocationResult::Infeasible { .. } => &[],
        }
    }
}

/// Errors for requirement sets that are invalid before any placement
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("requirement {id} has invalid host count {host_count}")]
    InvalidRequirement { id: String, host_count: u64 },
}
