//! Random subnetting instances.
//!
//! An instance is a random parent network plus a requirement set built
//! backwards from randomly chosen subnet masks, so a feasible instance is
//! feasible by construction. Infeasible instances start from a feasible
//! set and inflate every requirement until the set no longer fits.

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GeneratorSettings, ValidationError};
use crate::ip::{Address, CidrNetwork, FormatError, ADDRESS_BITS};
use crate::planner::{self, host_bits, required_addresses, AllocationResult, PlanError, Requirement};

/// Errors raised while generating an instance
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("mask sampling gave up after {trials} trials with {collected} of {wanted} masks")]
    TrialsExhausted { trials: usize, collected: usize, wanted: usize },

    #[error("no subnet prefix fits between /{low} and /{high}")]
    EmptyMaskRange { low: u8, high: u8 },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    InvalidSettings(#[from] ValidationError),
}

/// A generated parent network with its requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedInstance {
    pub network: CidrNetwork,
    /// Requirements in generation order
    pub requirements: Vec<Requirement>,
    pub expected_feasible: bool,
}

impl GeneratedInstance {
    pub fn plan(&self) -> Result<AllocationResult, PlanError> {
        planner::plan(&self.network, &self.requirements)
    }
}

/// Produces random instances within the ranges of [`GeneratorSettings`]
#[derive(Debug, Clone, Default)]
pub struct InstanceGenerator {
    settings: GeneratorSettings,
}

impl InstanceGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Random base address with a prefix drawn from the configured range
    pub fn generate_network<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CidrNetwork, GenerationError> {
        let address = Address::new(rng.gen());
        let prefix = rng.gen_range(self.settings.min_network_prefix..=self.settings.max_network_prefix);
        Ok(CidrNetwork::new(address, prefix)?)
    }

    pub fn generate_subnet_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.settings.min_subnets..=self.settings.max_subnets)
    }

    /// Rejection-sample `count` subnet prefixes whose blocks fit in `network`.
    ///
    /// A candidate is kept while the running total stays strictly below the
    /// parent's size, or reaches it exactly with the last mask.
    pub fn generate_masks<R: Rng + ?Sized>(
        &self,
        network: &CidrNetwork,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<u8>, GenerationError> {
        let min_offset = host_bits(count as u64) as u8;
        let low = network.prefix_length().saturating_add(min_offset);
        let high = self.settings.max_subnet_prefix;
        if count > 0 && low > high {
            return Err(GenerationError::EmptyMaskRange { low, high });
        }

        let parent_total = network.total_addresses();
        let mut masks = Vec::with_capacity(count);
        let mut allocated = 0u64;
        let mut trials = 0;

        while masks.len() < count {
            if trials == self.settings.max_mask_trials {
                warn!("Mask sampling for {} exhausted {} trials ({} of {} masks)",
                      network, trials, masks.len(), count);
                return Err(GenerationError::TrialsExhausted {
                    trials,
                    collected: masks.len(),
                    wanted: count,
                });
            }
            trials += 1;

            let prefix: u8 = rng.gen_range(low..=high);
            let total = allocated + (1u64 << (ADDRESS_BITS - u32::from(prefix)));
            let last = count - masks.len() == 1;

            if total < parent_total || (total == parent_total && last) {
                allocated = total;
                masks.push(prefix);
            } else {
                debug!("Rejected /{} for {} ({} of {} addresses taken)",
                       prefix, network, allocated, parent_total);
            }
        }

        debug!("Sampled masks {:?} for {} in {} trials", masks, network, trials);
        Ok(masks)
    }

    /// Requirements `{label}1..{label}n`, one per sampled mask, each drawn
    /// from the upper half of that mask's allocatable range
    pub fn generate_requirements<R: Rng + ?Sized>(
        &self,
        network: &CidrNetwork,
        rng: &mut R,
        count: usize,
        label: &str,
    ) -> Result<Vec<Requirement>, GenerationError> {
        let masks = self.generate_masks(network, rng, count)?;

        let mut requirements = Vec::with_capacity(masks.len());
        for (index, prefix) in masks.into_iter().enumerate() {
            let allocatable = CidrNetwork::new(Address::ZERO, prefix)?.allocatable_addresses();
            let host_count = rng.gen_range(allocatable / 2..=allocatable).max(1);
            requirements.push(Requirement::new(format!("{}{}", label, index + 1), host_count));
        }

        Ok(requirements)
    }

    /// Inflate every requirement by the same slack so the set overflows `network`
    pub fn make_infeasible<R: Rng + ?Sized>(
        &self,
        network: &CidrNetwork,
        requirements: &mut [Requirement],
        rng: &mut R,
    ) {
        if requirements.is_empty() {
            return;
        }

        let requested: u64 = requirements.iter().map(|requirement| requirement.host_count).sum();
        let remaining = network.allocatable_addresses().saturating_sub(requested);
        let slack = remaining / requirements.len() as u64
            + rng.gen_range(1..=self.settings.max_extra_addresses);

        for requirement in requirements.iter_mut() {
            requirement.host_count += slack;
        }

        // Power-of-two blocks can still fill the parent exactly
        let mut extra = 0;
        while required_addresses(requirements) <= network.total_addresses() {
            for requirement in requirements.iter_mut() {
                requirement.host_count += 1;
            }
            extra += 1;
        }

        debug!("Inflated requirements for {} by {} hosts each", network, slack + extra);
    }

    /// Generate an instance with requirement ids `R1..Rn`
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, feasible: bool) -> Result<GeneratedInstance, GenerationError> {
        self.generate_labeled(rng, feasible, "R")
    }

    /// Generate an instance with requirement ids `{label}1..{label}n`
    pub fn generate_labeled<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        feasible: bool,
        label: &str,
    ) -> Result<GeneratedInstance, GenerationError> {
        let network = self.generate_network(rng)?;
        let count = self.generate_subnet_count(rng);
        let mut requirements = self.generate_requirements(&network, rng, count, label)?;

        if !feasible {
            self.make_infeasible(&network, &mut requirements, rng);
        }

        info!("Generated {} instance {} with {} requirements",
              if feasible { "feasible" } else { "infeasible" }, network, requirements.len());

        Ok(GeneratedInstance {
            network,
            requirements,
            expected_feasible: feasible,
        })
    }
}
