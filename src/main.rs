use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use lnsim_netgen::config::GeneratorConfig;
use lnsim_netgen::config_loader::{self, CliOverrides};
use lnsim_netgen::orchestrator;

/// Random network map generator for the Lightning network simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the generator configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of nodes in the network
    #[arg(short, long)]
    nodes: Option<u32>,

    /// Outgoing channels generated per node
    #[arg(long)]
    channels: Option<u32>,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with the transactions attached to every channel
    #[arg(short, long)]
    transactions: Option<PathBuf>,

    /// JSON file with the final simulation state; adds the "Results" section
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// Output path for the network map
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the network map
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            nodes: self.nodes,
            channels_per_node: self.channels,
            seed: self.seed,
            transactions: self.transactions.clone(),
            results: self.results.clone(),
            output: self.output.clone(),
            pretty: self.pretty,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting LNSim network map generator");

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => GeneratorConfig::default(),
    };
    config_loader::apply_overrides(&mut config, &args.overrides())?;

    info!("Nodes: {}", config.network.nodes);
    info!("Channels per node: {}", config.network.channels_per_node);
    info!("Output: {:?}", config.output.path);

    let document = orchestrator::run(&config)?;

    info!(
        "Generation completed successfully ({} nodes, results {})",
        document.nodes.len(),
        if document.has_results() { "included" } else { "omitted" }
    );
    Ok(())
}
