//! Network map orchestrator.
//!
//! This module drives a generation run from configuration to emitted
//! document:
//!
//! `Configured -> TopologyBuilt -> TransactionsAttached -> [ResultsAggregated] -> Emitted`
//!
//! Each run owns its map from scratch and uses a single seeded generator,
//! so the same seed and inputs always produce the same bytes.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GeneratorConfig;
use crate::emitter::{emit, AtomicFileSink, ConfigDocument, DocumentSink, EmitMode};
use crate::error::MapError;
use crate::results::load_simulation_state;
use crate::topology::{NetworkMap, RandomTopologyBuilder};
use crate::traffic::{attach_transactions, load_transactions, Transaction};

/// Resolve the run's seed, drawing one from entropy when none is configured
pub fn resolve_seed(config: &GeneratorConfig) -> u64 {
    match config.network.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::thread_rng().gen();
            info!("No seed configured, using {} (set network.seed to replay this run)", seed);
            seed
        }
    }
}

/// Generate a network map and write it to `sink`.
///
/// `transactions` is attached to every channel. When `mode` carries a
/// result summary it is emitted after the nodes.
pub fn generate_network_map<S: DocumentSink>(
    config: &GeneratorConfig,
    transactions: &[Transaction],
    mode: EmitMode,
    sink: S,
) -> std::result::Result<ConfigDocument, MapError> {
    let seed = resolve_seed(config);
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(config, transactions, mode, &mut rng, sink)
}

/// Same as [`generate_network_map`] with a caller-supplied generator
pub fn generate_with_rng<S: DocumentSink, R: Rng + ?Sized>(
    config: &GeneratorConfig,
    transactions: &[Transaction],
    mode: EmitMode,
    rng: &mut R,
    sink: S,
) -> std::result::Result<ConfigDocument, MapError> {
    let map = build_network_map(config, transactions, rng)?;
    emit_stage(map, mode, config, sink)
}

/// Build the topology and attach `transactions` to every channel
pub fn build_network_map<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    transactions: &[Transaction],
    rng: &mut R,
) -> std::result::Result<NetworkMap, MapError> {
    let mut map = RandomTopologyBuilder::new(config.network.nodes, config.network.channels_per_node)
        .with_bounds(config.network.attributes)
        .build(rng)?;
    debug!("Stage: topology built ({} channels)", map.channel_count());

    attach_transactions(&mut map, transactions);
    debug!("Stage: transactions attached");

    Ok(map)
}

fn emit_stage<S: DocumentSink>(
    map: NetworkMap,
    mode: EmitMode,
    config: &GeneratorConfig,
    sink: S,
) -> std::result::Result<ConfigDocument, MapError> {
    let document = emit(map, mode, config.output.format, sink)?;
    debug!("Stage: emitted");
    Ok(document)
}

/// Run a full generation from configuration: load inputs, generate, write
/// the map atomically to the configured output path.
///
/// The simulation state file is read up front so a missing or malformed
/// file fails the run before any generation work, but it is only
/// aggregated once the topology has been built.
pub fn run(config: &GeneratorConfig) -> Result<ConfigDocument> {
    let transactions = match &config.traffic.transactions {
        Some(path) => load_transactions(path)?,
        None => {
            info!("No transaction file configured, channels will carry no transactions");
            Vec::new()
        }
    };

    let state = match &config.results.state {
        Some(path) => Some(load_simulation_state(path)?),
        None => None,
    };
    debug!(
        "Stage: configured ({} nodes, {} channels per node, {} transactions)",
        config.network.nodes,
        config.network.channels_per_node,
        transactions.len()
    );

    let seed = resolve_seed(config);
    let mut rng = StdRng::seed_from_u64(seed);
    let map = build_network_map(config, &transactions, &mut rng)
        .wrap_err("Failed to build network map")?;

    let mode = match state {
        Some(state) => {
            let summary = state.summarize().wrap_err("Failed to aggregate simulation results")?;
            info!(
                "Simulation completed: {} transactions, {} hops, network balance {}",
                summary.transactions, summary.hops, summary.network_balance
            );
            debug!("Stage: results aggregated");
            EmitMode::WithResults(summary)
        }
        None => EmitMode::TopologyOnly,
    };

    let sink = AtomicFileSink::new(&config.output.path);
    let document = emit_stage(map, mode, config, sink)
        .wrap_err_with(|| format!("Failed to write network map {}", config.output.path.display()))?;

    info!("Network map written to {:?}", config.output.path);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::WriterSink;

    fn config_with_seed(seed: u64) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.network.nodes = 5;
        config.network.channels_per_node = 2;
        config.network.seed = Some(seed);
        config
    }

    #[test]
    fn test_same_seed_same_bytes() {
        let config = config_with_seed(2019);

        let mut first: Vec<u8> = Vec::new();
        let mut second: Vec<u8> = Vec::new();
        generate_network_map(&config, &[], EmitMode::TopologyOnly, WriterSink(&mut first)).unwrap();
        generate_network_map(&config, &[], EmitMode::TopologyOnly, WriterSink(&mut second)).unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut first: Vec<u8> = Vec::new();
        let mut second: Vec<u8> = Vec::new();
        generate_network_map(&config_with_seed(1), &[], EmitMode::TopologyOnly, WriterSink(&mut first)).unwrap();
        generate_network_map(&config_with_seed(2), &[], EmitMode::TopologyOnly, WriterSink(&mut second)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_topology_nothing_written() {
        let mut config = config_with_seed(3);
        config.network.nodes = 1;

        let mut out: Vec<u8> = Vec::new();
        let result = generate_network_map(&config, &[], EmitMode::TopologyOnly, WriterSink(&mut out));
        assert!(matches!(result, Err(MapError::InvalidTopologyParameters { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_resolve_seed_prefers_config() {
        assert_eq!(resolve_seed(&config_with_seed(77)), 77);
    }

    #[test]
    fn test_run_matches_generate_for_same_seed() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = config_with_seed(40);
        config.output.path = dir.path().join("custom.json");

        let document = run(&config).unwrap();

        let mut out: Vec<u8> = Vec::new();
        let expected = generate_network_map(&config, &[], EmitMode::TopologyOnly, WriterSink(&mut out)).unwrap();
        assert_eq!(document, expected);
        assert_eq!(std::fs::read(&config.output.path).unwrap(), out);
    }

    #[test]
    fn test_run_overflowing_state_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let state_path = dir.path().join("state.json");
        std::fs::write(
            &state_path,
            r#"{"nodes":[{"id":"1","alias":"Node1","balance":"18446744073709551615"},{"id":"2","alias":"Node2","balance":"1"}],
                "transactions":"0","hops":"0","congested_channels":"0"}"#,
        )
        .unwrap();

        let mut config = config_with_seed(41);
        config.results.state = Some(state_path);
        config.output.path = dir.path().join("custom.json");

        assert!(run(&config).is_err());
        assert!(!config.output.path.exists());
    }
}
