use serde::{Deserialize, Serialize};

use crate::planner::host_bits;

/// Top-level configuration for exercise generation.
///
/// Every section has defaults, so an empty YAML document is a valid
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub generator: GeneratorSettings,
    pub exercise: ExerciseSettings,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.generator.validate()?;
        self.exercise.validate()?;

        if let Some(level) = &self.general.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(ValidationError::InvalidGeneral(format!(
                    "unknown log_level '{}'",
                    level
                )));
            }
        }

        Ok(())
    }
}

/// Shared general configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Seed for reproducible exercises; fresh entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Parameter ranges for random instance generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub min_network_prefix: u8,
    pub max_network_prefix: u8,
    pub min_subnets: usize,
    pub max_subnets: usize,
    /// Longest prefix a generated subnet may use
    pub max_subnet_prefix: u8,
    /// Upper bound of the random slack added to infeasible instances
    pub max_extra_addresses: u64,
    /// Rejection-sampling budget for subnet masks
    pub max_mask_trials: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_network_prefix: 20,
            max_network_prefix: 26,
            min_subnets: 3,
            max_subnets: 5,
            max_subnet_prefix: 29,
            max_extra_addresses: 10,
            max_mask_trials: 10_000,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_network_prefix > self.max_network_prefix {
            return Err(ValidationError::InvalidGenerator(format!(
                "min_network_prefix {} is greater than max_network_prefix {}",
                self.min_network_prefix, self.max_network_prefix
            )));
        }
        if self.max_network_prefix > 30 {
            return Err(ValidationError::InvalidGenerator(format!(
                "max_network_prefix {} leaves no room for host addresses",
                self.max_network_prefix
            )));
        }
        if self.max_subnet_prefix > 30 {
            return Err(ValidationError::InvalidGenerator(format!(
                "max_subnet_prefix {} leaves no room for host addresses",
                self.max_subnet_prefix
            )));
        }
        if self.min_subnets == 0 {
            return Err(ValidationError::InvalidGenerator(
                "min_subnets must be at least 1".to_string(),
            ));
        }
        if self.min_subnets > self.max_subnets {
            return Err(ValidationError::InvalidGenerator(format!(
                "min_subnets {} is greater than max_subnets {}",
                self.min_subnets, self.max_subnets
            )));
        }
        // Subnet masks are drawn from [network prefix + bits for the subnet count, max_subnet_prefix]
        let longest_needed = u32::from(self.max_network_prefix) + host_bits(self.max_subnets as u64);
        if longest_needed > u32::from(self.max_subnet_prefix) {
            return Err(ValidationError::InvalidGenerator(format!(
                "a /{} network cannot hold {} subnets of at most /{}",
                self.max_network_prefix, self.max_subnets, self.max_subnet_prefix
            )));
        }
        if self.max_extra_addresses == 0 {
            return Err(ValidationError::InvalidGenerator(
                "max_extra_addresses must be at least 1".to_string(),
            ));
        }
        if self.max_mask_trials == 0 {
            return Err(ValidationError::InvalidGenerator(
                "max_mask_trials must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shape of a multi-network exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseSettings {
    /// Networks per exercise
    pub items: usize,
    /// How many of those networks cannot be allocated
    pub infeasible_items: usize,
}

impl Default for ExerciseSettings {
    fn default() -> Self {
        Self { items: 3, infeasible_items: 1 }
    }
}

impl ExerciseSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items == 0 {
            return Err(ValidationError::InvalidExercise(
                "items must be at least 1".to_string(),
            ));
        }
        if self.infeasible_items > self.items {
            return Err(ValidationError::InvalidExercise(format!(
                "infeasible_items {} exceeds items {}",
                self.infeasible_items, self.items
            )));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid generator configuration: {0}")]
    InvalidGenerator(String),
    #[error("Invalid exercise configuration: {0}")]
    InvalidExercise(String),
}
