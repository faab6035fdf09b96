//! Shared utilities: decimal-string field encoding, parameter validation.

pub mod decimal_string;
pub mod validation;

pub use validation::validate_topology_params;
