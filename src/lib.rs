//! Endpoint Validator - REST API validation against an OpenAPI 3.0 contract
//!
//! This library turns OAS documents into test suites, resolves the
//! parameters of a validation run from flags, stored configurations and
//! overrides, and executes the resulting plan.

pub mod cli;
pub mod commands;
pub mod common;
pub mod json;
pub mod params;
pub mod resolver;
pub mod runner;
pub mod source;
pub mod store;
pub mod suite;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use resolver::{Collaborators, ResolvedParameters, Resolver, ValidateOptions};
pub use store::Configuration;
