//! Multi-network exercises.
//!
//! An exercise bundles several generated instances, a configured number of
//! which are deliberately impossible to allocate. Network `i` is labelled
//! `R{i}` and its subnets `R{i}1`, `R{i}2`, and so on.

use std::collections::HashSet;

use log::{info, warn};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::instance::{GeneratedInstance, GenerationError, InstanceGenerator};
use crate::config::ExerciseSettings;
use crate::ip::CidrNetwork;
use crate::planner::{AllocationResult, PlanError};

/// One labelled network of an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub label: String,
    pub instance: GeneratedInstance,
}

/// Answer key entry for one exercise item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseAnswer {
    pub label: String,
    pub network: CidrNetwork,
    pub result: AllocationResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub items: Vec<ExerciseItem>,
}

impl Exercise {
    /// Generate `settings.items` instances, `settings.infeasible_items` of
    /// them infeasible at random positions
    pub fn generate<R: Rng + ?Sized>(
        generator: &InstanceGenerator,
        settings: &ExerciseSettings,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        settings.validate()?;

        let infeasible: HashSet<usize> = index::sample(rng, settings.items, settings.infeasible_items)
            .into_iter()
            .collect();

        let mut items = Vec::with_capacity(settings.items);
        for position in 0..settings.items {
            let label = format!("R{}", position + 1);
            let feasible = !infeasible.contains(&position);
            let instance = generator.generate_labeled(rng, feasible, &label)?;
            items.push(ExerciseItem { label, instance });
        }

        info!("Generated exercise with {} networks ({} infeasible)", items.len(), infeasible.len());
        Ok(Exercise { items })
    }

    /// Plan every item of the exercise
    pub fn answers(&self) -> Result<Vec<ExerciseAnswer>, PlanError> {
        self.items
            .iter()
            .map(|item| {
                let result = item.instance.plan()?;
                if result.is_feasible() != item.instance.expected_feasible {
                    warn!("{} was generated as {} but planned as {}",
                          item.label,
                          feasibility(item.instance.expected_feasible),
                          feasibility(result.is_feasible()));
                }
                Ok(ExerciseAnswer {
                    label: item.label.clone(),
                    network: item.instance.network,
                    result,
                })
            })
            .collect()
    }
}

fn feasibility(feasible: bool) -> &'static str {
    if feasible { "feasible" } else { "infeasible" }
}
