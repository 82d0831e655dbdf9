//! Greedy VLSM placement.
//!
//! Requirements are placed largest first, back to back, starting at the
//! parent's network address. Subnets are not aligned to their own size;
//! each one simply begins where the previous one ended.

use log::{debug, info, warn};

use super::types::{AllocationRecord, AllocationResult, InfeasibleReason, PlanError, Requirement};
use crate::ip::CidrNetwork;

/// Host bits needed for `host_count` addresses: the bit length of
/// `host_count - 1`, with a single host needing none.
pub fn host_bits(host_count: u64) -> u32 {
    if host_count <= 1 {
        0
    } else {
        u64::BITS - (host_count - 1).leading_zeros()
    }
}

/// Smallest power of two that is `>= host_count`
pub fn subnet_size(host_count: u64) -> u64 {
    1u64.checked_shl(host_bits(host_count)).unwrap_or(u64::MAX)
}

/// Addresses consumed by placing every requirement in its own block
pub fn required_addresses(requirements: &[Requirement]) -> u64 {
    requirements
        .iter()
        .map(|requirement| subnet_size(requirement.host_count))
        .fold(0u64, u64::saturating_add)
}

/// Sort by descending host count; ties keep their input order
fn sort_largest_first<T>(items: &mut [T], host_count: impl Fn(&T) -> u64) {
    items.sort_by(|a, b| host_count(b).cmp(&host_count(a)));
}

/// Plan a VLSM allocation of `requirements` inside `network`.
///
/// Returns `Err` only for invalid input (a zero host count). A requirement
/// set that does not fit is reported as [`AllocationResult::Infeasible`];
/// no partial allocation is ever returned.
pub fn plan(network: &CidrNetwork, requirements: &[Requirement]) -> Result<AllocationResult, PlanError> {
    if let Some(invalid) = requirements.iter().find(|requirement| requirement.host_count == 0) {
        return Err(PlanError::InvalidRequirement {
            id: invalid.id.clone(),
            host_count: invalid.host_count,
        });
    }

    let mut ordered: Vec<&Requirement> = requirements.iter().collect();
    sort_largest_first(&mut ordered, |requirement| requirement.host_count);

    let base = network.network_address();
    let mut offset: u64 = 0;
    let mut records = Vec::with_capacity(ordered.len());

    debug!("Planning {} requirements inside {} (base {})", ordered.len(), network, base);

    for requirement in ordered {
        let bits = host_bits(requirement.host_count);
        let available = network.total_addresses().saturating_sub(offset);

        let subnet = base
            .checked_add(offset)
            .and_then(|candidate| CidrNetwork::from_host_bits(candidate, bits));
        let Some(subnet) = subnet else {
            let reason = if bits > crate::ip::ADDRESS_BITS {
                InfeasibleReason::SubnetTooLarge {
                    requirement_id: requirement.id.clone(),
                    host_count: requirement.host_count,
                }
            } else {
                InfeasibleReason::OutOfSpace {
                    requirement_id: requirement.id.clone(),
                    host_count: requirement.host_count,
                    required: subnet_size(requirement.host_count),
                    available,
                }
            };
            warn!("Allocation inside {} is infeasible: {}", network, reason);
            return Ok(AllocationResult::Infeasible { reason });
        };

        let size = subnet.total_addresses();
        let last = subnet.base_address().checked_add(size - 1);
        let fits = network.contains(subnet.base_address())
            && last.is_some_and(|last| network.contains(last));

        if !fits {
            let reason = InfeasibleReason::OutOfSpace {
                requirement_id: requirement.id.clone(),
                host_count: requirement.host_count,
                required: size,
                available,
            };
            warn!("Allocation inside {} is infeasible: {}", network, reason);
            return Ok(AllocationResult::Infeasible { reason });
        }

        debug!("Placed {} ({} hosts) at {}", requirement.id, requirement.host_count, subnet);
        records.push(AllocationRecord {
            requirement_id: requirement.id.clone(),
            host_count: requirement.host_count,
            subnet,
        });
        offset += size;
    }

    sort_largest_first(&mut records, |record| record.host_count);

    info!("Allocated {} subnets using {} of {} addresses in {}",
          records.len(), offset, network.total_addresses(), network);
    Ok(AllocationResult::Feasible { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(text: &str) -> CidrNetwork {
        CidrNetwork::parse(text).unwrap()
    }

    fn subnets(result: &AllocationResult) -> Vec<(String, String)> {
        result
            .records()
            .iter()
            .map(|record| (record.requirement_id.clone(), record.subnet.to_string()))
            .collect()
    }

    #[test]
    fn test_host_bits() {
        assert_eq!(host_bits(1), 0);
        assert_eq!(host_bits(2), 1);
        assert_eq!(host_bits(3), 2);
        assert_eq!(host_bits(4), 2);
        assert_eq!(host_bits(5), 3);
        assert_eq!(host_bits(128), 7);
        assert_eq!(host_bits(129), 8);
        assert_eq!(host_bits(1 << 32), 32);
        assert_eq!(host_bits((1 << 32) + 1), 33);
    }

    #[test]
    fn test_subnet_size_is_next_power_of_two() {
        assert_eq!(subnet_size(1), 1);
        assert_eq!(subnet_size(100), 128);
        assert_eq!(subnet_size(64), 64);
        assert_eq!(subnet_size(65), 128);
    }

    #[test]
    fn test_required_addresses() {
        let requirements = vec![Requirement::new("a", 100), Requirement::new("b", 50), Requirement::new("c", 3)];
        assert_eq!(required_addresses(&requirements), 128 + 64 + 4);
    }

    #[test]
    fn test_plan_largest_first() {
        let requirements = vec![
            Requirement::new("R3", 20),
            Requirement::new("R1", 100),
            Requirement::new("R2", 50),
        ];
        let result = plan(&net("192.168.0.0/24"), &requirements).unwrap();

        assert_eq!(
            subnets(&result),
            vec![
                ("R1".to_string(), "192.168.0.0/25".to_string()),
                ("R2".to_string(), "192.168.0.128/26".to_string()),
                ("R3".to_string(), "192.168.0.192/27".to_string()),
            ]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let requirements = vec![
            Requirement::new("first", 30),
            Requirement::new("big", 60),
            Requirement::new("second", 30),
        ];
        let result = plan(&net("10.0.0.0/24"), &requirements).unwrap();

        assert_eq!(
            subnets(&result),
            vec![
                ("big".to_string(), "10.0.0.0/26".to_string()),
                ("first".to_string(), "10.0.0.64/27".to_string()),
                ("second".to_string(), "10.0.0.96/27".to_string()),
            ]
        );
    }

    #[test]
    fn test_unaligned_base_is_normalized() {
        let result = plan(&net("10.1.2.200/24"), &[Requirement::new("only", 10)]).unwrap();
        assert_eq!(subnets(&result), vec![("only".to_string(), "10.1.2.0/28".to_string())]);
    }

    #[test]
    fn test_out_of_space_aborts_without_partial_plan() {
        // The first two blocks fill the /24 completely
        let requirements = vec![
            Requirement::new("a", 128),
            Requirement::new("b", 100),
            Requirement::new("c", 2),
        ];
        let result = plan(&net("10.0.0.0/24"), &requirements).unwrap();
        assert_eq!(
            result,
            AllocationResult::Infeasible {
                reason: InfeasibleReason::OutOfSpace {
                    requirement_id: "c".to_string(),
                    host_count: 2,
                    required: 2,
                    available: 0,
                },
            }
        );

        let overhang = plan(&net("10.0.0.0/24"), &[Requirement::new("a", 200), Requirement::new("b", 64)]).unwrap();
        assert!(!overhang.is_feasible());
        assert!(overhang.records().is_empty());
    }

    #[test]
    fn test_exact_fill_is_feasible() {
        let requirements = vec![Requirement::new("a", 128), Requirement::new("b", 64), Requirement::new("c", 64)];
        let result = plan(&net("10.0.0.0/24"), &requirements).unwrap();
        assert!(result.is_feasible());
        assert_eq!(result.records()[2].subnet.broadcast_address().to_string(), "10.0.0.255");
    }

    #[test]
    fn test_top_of_address_space_does_not_wrap() {
        let requirements = vec![Requirement::new("a", 128), Requirement::new("b", 128), Requirement::new("c", 1)];
        let result = plan(&net("255.255.255.0/24"), &requirements).unwrap();
        assert!(!result.is_feasible());
    }

    #[test]
    fn test_oversized_requirement() {
        let result = plan(&net("0.0.0.0/0"), &[Requirement::new("huge", (1 << 32) + 1)]).unwrap();
        assert!(matches!(
            result,
            AllocationResult::Infeasible { reason: InfeasibleReason::SubnetTooLarge { .. } }
        ));
    }

    #[test]
    fn test_zero_host_count_is_invalid() {
        let requirements = vec![Requirement::new("ok", 10), Requirement::new("bad", 0)];
        assert_eq!(
            plan(&net("10.0.0.0/24"), &requirements),
            Err(PlanError::InvalidRequirement { id: "bad".to_string(), host_count: 0 })
        );
    }

    #[test]
    fn test_empty_requirements() {
        let result = plan(&net("10.0.0.0/24"), &[]).unwrap();
        assert_eq!(result, AllocationResult::Feasible { records: vec![] });
    }
}
