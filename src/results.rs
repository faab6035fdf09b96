//! Aggregate statistics of a completed simulation.
//!
//! After the simulator has run over a network map it hands back its final
//! node and channel state plus a few counters. This module folds that into
//! the single `ResultSummary` row emitted under `"Results"`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use log::{debug, info};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::MapError;
use crate::topology::{Channel, Node};
use crate::utils::decimal_string;

/// Counters computed by the simulator and reported verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationCounters {
    #[serde(with = "decimal_string")]
    pub transactions: usize,
    #[serde(with = "decimal_string")]
    pub hops: u64,
    #[serde(with = "decimal_string")]
    pub congested_channels: u64,
}

/// Final simulator state handed back for aggregation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(flatten)]
    pub counters: SimulationCounters,
}

impl SimulationState {
    pub fn summarize(&self) -> std::result::Result<ResultSummary, MapError> {
        aggregate(&self.nodes, &self.channels, &self.counters)
    }
}

/// Reserved slot for failed transactions; never populated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reserved;

impl Serialize for Reserved {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str("")
    }
}

/// One row of simulation results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    #[serde(rename = "Transactions", serialize_with = "decimal_string::serialize")]
    pub transactions: usize,
    #[serde(rename = "Failed Transactions")]
    pub failed_transactions: Reserved,
    #[serde(rename = "Hops", serialize_with = "decimal_string::serialize")]
    pub hops: u64,
    #[serde(rename = "Fees", serialize_with = "decimal_string::serialize")]
    pub fees: u64,
    #[serde(rename = "Channels", serialize_with = "decimal_string::serialize")]
    pub channels: usize,
    #[serde(rename = "Congested Channels", serialize_with = "decimal_string::serialize")]
    pub congested_channels: u64,
    #[serde(rename = "Network Balance", serialize_with = "decimal_string::serialize")]
    pub network_balance: u64,
    #[serde(rename = "Network Size", serialize_with = "decimal_string::serialize")]
    pub network_size: usize,
}

/// Summarize a completed simulation.
///
/// Sums node balances and channel fees, counts nodes and channels, and
/// copies the simulator's counters through unchanged. Empty collections
/// yield zeros.
///
/// # Errors
///
/// `MapError::AggregateOverflow` when the balance or fee total does not
/// fit in a `u64`.
pub fn aggregate(
    nodes: &[Node],
    channels: &[Channel],
    counters: &SimulationCounters,
) -> std::result::Result<ResultSummary, MapError> {
    let network_balance = checked_total(nodes.iter().map(|n| n.balance), "node balances")?;
    let fees = checked_total(channels.iter().map(|c| c.fee), "channel fees")?;

    debug!(
        "Aggregated {} nodes (balance {}) and {} channels (fees {})",
        nodes.len(),
        network_balance,
        channels.len(),
        fees
    );

    Ok(ResultSummary {
        transactions: counters.transactions,
        failed_transactions: Reserved,
        hops: counters.hops,
        fees,
        channels: channels.len(),
        congested_channels: counters.congested_channels,
        network_balance,
        network_size: nodes.len(),
    })
}

fn checked_total(
    mut values: impl Iterator<Item = u64>,
    field: &'static str,
) -> std::result::Result<u64, MapError> {
    values
        .try_fold(0u64, |total, value| total.checked_add(value))
        .ok_or(MapError::AggregateOverflow { field })
}

/// Load the simulator's final state from a JSON file
pub fn load_simulation_state(path: &Path) -> Result<SimulationState> {
    info!("Loading simulation state from: {:?}", path);

    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open simulation state {}", path.display()))?;
    let state: SimulationState = serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Failed to parse simulation state {}", path.display()))?;

    debug!(
        "Loaded simulation state: {} nodes, {} channels",
        state.nodes.len(),
        state.channels.len()
    );
    Ok(state)
}
