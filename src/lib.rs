//! # vlsm-drill - IPv4 subnetting exercise generator and solver
//!
//! This library generates and solves Variable-Length Subnet Mask (VLSM)
//! exercises: given a parent network and a set of per-subnet host counts,
//! it either places every subnet inside the parent or reports that no
//! allocation exists.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `ip`: 32-bit address arithmetic and CIDR networks
//! - `planner`: greedy largest-first VLSM allocation
//! - `generator`: random feasible or over-subscribed instances and exercises
//! - `render`: plain-text question sheets and answer keys
//! - `config`: typed generator configuration
//! - `config_loader`: YAML configuration loading
//!
//! ## Example Usage
//!
//! ```rust
//! use vlsm_drill::ip::CidrNetwork;
//! use vlsm_drill::planner::{plan, AllocationResult, Requirement};
//!
//! let network: CidrNetwork = "192.168.0.0/24".parse()?;
//! let requirements = vec![
//!     Requirement::new("R1", 100),
//!     Requirement::new("R2", 50),
//!     Requirement::new("R3", 20),
//! ];
//!
//! match plan(&network, &requirements)? {
//!     AllocationResult::Feasible { records } => {
//!         assert_eq!(records[0].subnet.to_string(), "192.168.0.0/25");
//!     }
//!     AllocationResult::Infeasible { reason } => panic!("{}", reason),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Generation takes an explicit random source so exercises are reproducible:
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use vlsm_drill::generator::InstanceGenerator;
//!
//! let generator = InstanceGenerator::default();
//! let instance = generator.generate(&mut StdRng::seed_from_u64(42), false)?;
//! assert!(!instance.plan()?.is_feasible());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return typed `thiserror` errors. An allocation that
//! does not fit is not an error: it is the `Infeasible` variant of
//! [`planner::AllocationResult`]. The binary reports errors through
//! `color_eyre`.

pub mod ip;
pub mod planner;
pub mod generator;
pub mod render;
pub mod config;
pub mod config_loader;
