use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::emitter::OutputFormat;
use crate::error::MapError;
use crate::topology::AttributeBounds;
use crate::utils::validation::validate_topology_params;

/// Generator configuration, usually read from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub traffic: TrafficConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl GeneratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_topology_params(
            self.network.nodes,
            self.network.channels_per_node,
            &self.network.attributes,
        )
        .map_err(|e| match e {
            MapError::InvalidTopologyParameters { reason } => ValidationError::InvalidNetwork(reason),
            other => ValidationError::InvalidNetwork(other.to_string()),
        })?;

        if self.output.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidOutput(
                "output path cannot be empty".to_string(),
            ));
        }

        if let Some(path) = &self.traffic.transactions {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidTraffic(
                    "transactions path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(path) = &self.results.state {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidResults(
                    "state path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Shape of the generated network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_nodes")]
    pub nodes: u32,
    #[serde(default = "default_channels_per_node")]
    pub channels_per_node: u32,
    /// Seed for the generator; a random seed is chosen and logged when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub attributes: AttributeBounds,
}

/// Where the simulator's transactions come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<PathBuf>,
}

/// Final simulation state; its presence marks the simulation as completed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PathBuf>,
}

/// Destination of the network map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
    #[error("Invalid traffic configuration: {0}")]
    InvalidTraffic(String),
    #[error("Invalid results configuration: {0}")]
    InvalidResults(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
}

fn default_nodes() -> u32 {
    10
}

fn default_channels_per_node() -> u32 {
    2
}

fn default_output_path() -> PathBuf {
    PathBuf::from("custom.json")
}

/// Default implementations
impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            channels_per_node: default_channels_per_node(),
            seed: None,
            attributes: AttributeBounds::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::Compact,
        }
    }
}
