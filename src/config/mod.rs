//! Configuration loading and management for the compensation engine.
//!
//! This module provides functionality to load the compensation configuration
//! from a YAML file: the admin base salary, working-day defaults, and the
//! per-branch commission table.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Branches configured: {}", loader.config().branches.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CommissionRule, CompensationConfig};
