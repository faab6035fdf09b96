//! Network topology module.
//!
//! This module contains the node/channel model of the generated network
//! and the random builder that produces it.

pub mod builder;
pub mod types;

// Re-export key types for easier access
pub use builder::RandomTopologyBuilder;
pub use types::{AttributeBounds, Channel, NetworkMap, Node};
