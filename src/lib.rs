//! # LNSim network map generator
//!
//! This library generates the synthetic network map read by the Lightning
//! network payment simulator: a fixed number of nodes joined by randomly
//! directed payment channels, each channel carrying the simulator's
//! transaction list, optionally followed by a summary of a completed run.
//!
//! ## Pipeline
//!
//! 1. `topology`: build nodes `1..=N` and `channels_per_node` channels per
//!    node with random targets, capacities, fees and balances
//! 2. `traffic`: attach the full transaction list to every channel
//! 3. `results`: when the simulation has completed, summarize its final state
//! 4. `emitter`: serialize `{"Nodes": [...], "Results": [...]}` and write it
//!    through a `DocumentSink`
//!
//! `orchestrator` wires the stages together; `config` and `config_loader`
//! read the YAML configuration.
//!
//! ## Example Usage
//!
//! ```rust
//! use lnsim_netgen::config::GeneratorConfig;
//! use lnsim_netgen::emitter::{EmitMode, WriterSink};
//! use lnsim_netgen::orchestrator::generate_network_map;
//!
//! let mut config = GeneratorConfig::default();
//! config.network.seed = Some(42);
//!
//! let mut out: Vec<u8> = Vec::new();
//! let document = generate_network_map(&config, &[], EmitMode::TopologyOnly, WriterSink(&mut out))?;
//! assert_eq!(document.nodes.len(), 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Generation itself returns typed `MapError`s. File loading and the binary
//! use `color_eyre` for context-rich reports.

pub mod config;
pub mod config_loader;
pub mod emitter;
pub mod error;
pub mod orchestrator;
pub mod results;
pub mod topology;
pub mod traffic;
pub mod utils;

pub use error::MapError;
