use crate::config::GeneratorConfig;
use crate::emitter::OutputFormat;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<GeneratorConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration {}", config_path.display()))?;

    let config: GeneratorConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration {}", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub nodes: Option<u32>,
    pub channels_per_node: Option<u32>,
    pub seed: Option<u64>,
    pub transactions: Option<PathBuf>,
    pub results: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut GeneratorConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(nodes) = overrides.nodes {
        info!("Overriding node count: {}", nodes);
        config.network.nodes = nodes;
    }

    if let Some(channels) = overrides.channels_per_node {
        info!("Overriding channels per node: {}", channels);
        config.network.channels_per_node = channels;
    }

    if let Some(seed) = overrides.seed {
        info!("Overriding seed: {}", seed);
        config.network.seed = Some(seed);
    }

    if let Some(path) = &overrides.transactions {
        config.traffic.transactions = Some(path.clone());
    }

    if let Some(path) = &overrides.results {
        config.results.state = Some(path.clone());
    }

    if let Some(path) = &overrides.output {
        config.output.path = path.clone();
    }

    if overrides.pretty {
        config.output.format = OutputFormat::Pretty;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
network:
  nodes: 6
  channels_per_node: 1
  seed: 7
output:
  path: "out/custom.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.network.nodes, 6);
        assert_eq!(config.network.seed, Some(7));
        assert_eq!(config.output.path, PathBuf::from("out/custom.json"));
    }

    #[test]
    fn test_load_invalid_config() {
        let yaml = r#"
network:
  nodes: 0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = GeneratorConfig::default();

        let overrides = CliOverrides {
            nodes: Some(50),
            channels_per_node: Some(5),
            seed: Some(42),
            results: Some(PathBuf::from("state.json")),
            pretty: true,
            ..CliOverrides::default()
        };

        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.network.nodes, 50);
        assert_eq!(config.network.channels_per_node, 5);
        assert_eq!(config.network.seed, Some(42));
        assert_eq!(config.results.state, Some(PathBuf::from("state.json")));
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = GeneratorConfig::default();
        let overrides = CliOverrides { nodes: Some(1), ..CliOverrides::default() };
        assert!(apply_overrides(&mut config, &overrides).is_err());
    }
}
