//! Network map document assembly and output.
//!
//! The emitted document has the shape:
//!
//! ```json
//! {
//!   "Nodes": [
//!     { "id": "1", "alias": "Node1", "balance": "412",
//!       "channels": [
//!         { "id": "1", "from": "1", "to": "3", "capacity": "57", "fee": "2",
//!           "transactions": [
//!             { "secret": "...", "paymentRequest": "...",
//!               "tokens": "100", "createdAt": "1560000000", "expiredAt": "1560003600" }
//!           ] }
//!       ] }
//!   ],
//!   "Results": [
//!     { "Transactions": "10", "Failed Transactions": "", "Hops": "23", "Fees": "7",
//!       "Channels": "6", "Congested Channels": "1", "Network Balance": "1830",
//!       "Network Size": "3" }
//!   ]
//! }
//! ```
//!
//! `"Results"` is only present when the simulation has completed. The whole
//! document is serialized in memory before the sink sees a single byte.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::MapError;
use crate::results::ResultSummary;
use crate::topology::{NetworkMap, Node};

/// What the emitted document contains besides the topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitMode {
    /// Network map only, before the simulation has run
    TopologyOnly,
    /// Network map plus the summary of a completed simulation
    WithResults(ResultSummary),
}

/// JSON layout of the serialized document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
}

/// The document handed to the simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    #[serde(rename = "Nodes")]
    pub nodes: Vec<Node>,
    #[serde(rename = "Results", skip_serializing_if = "Option::is_none")]
    pub results: Option<[ResultSummary; 1]>,
}

impl ConfigDocument {
    pub fn new(map: NetworkMap, mode: EmitMode) -> Self {
        let results = match mode {
            EmitMode::TopologyOnly => None,
            EmitMode::WithResults(summary) => Some([summary]),
        };
        Self { nodes: map.nodes, results }
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    pub fn to_bytes(&self, format: OutputFormat) -> Result<Vec<u8>, MapError> {
        let bytes = match format {
            OutputFormat::Compact => serde_json::to_vec(self)?,
            OutputFormat::Pretty => serde_json::to_vec_pretty(self)?,
        };
        Ok(bytes)
    }
}

/// Destination for a serialized document.
///
/// A sink is consumed by the write, so each sink receives at most one
/// document. Implementations release whatever they hold on every path.
pub trait DocumentSink {
    fn write_document(self, bytes: &[u8]) -> io::Result<()>;
}

/// Writes to a file by way of a sibling temp file and a rename, so readers
/// never observe a partially written map.
#[derive(Debug, Clone)]
pub struct AtomicFileSink {
    path: PathBuf,
}

impl AtomicFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSink for AtomicFileSink {
    fn write_document(self, bytes: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        // Dropping the temp file on an error path deletes it
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

/// Writes to any `io::Write` stream
#[derive(Debug)]
pub struct WriterSink<W: Write>(pub W);

impl<W: Write> DocumentSink for WriterSink<W> {
    fn write_document(mut self, bytes: &[u8]) -> io::Result<()> {
        self.0.write_all(bytes)?;
        self.0.flush()
    }
}

/// Assemble the document for `map`, serialize it and write it to `sink`.
///
/// Returns the document that was written.
///
/// # Errors
///
/// `MapError::Serialization` if the document cannot be encoded and
/// `MapError::SinkWriteFailure` if the sink rejects the bytes.
pub fn emit<S: DocumentSink>(
    map: NetworkMap,
    mode: EmitMode,
    format: OutputFormat,
    sink: S,
) -> Result<ConfigDocument, MapError> {
    let document = ConfigDocument::new(map, mode);
    let bytes = document.to_bytes(format)?;

    info!(
        "Emitting network map: {} nodes, results {}, {} bytes",
        document.nodes.len(),
        if document.has_results() { "included" } else { "omitted" },
        bytes.len()
    );

    sink.write_document(&bytes).map_err(MapError::SinkWriteFailure)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{aggregate, SimulationCounters};
    use crate::topology::Channel;
    use tempfile::TempDir;

    fn small_map() -> NetworkMap {
        NetworkMap {
            nodes: vec![
                Node {
                    id: 1,
                    alias: "Node1".to_string(),
                    balance: 10,
                    channels: vec![Channel { id: 1, from: 1, to: 2, capacity: 50, fee: 3, transactions: Vec::new() }],
                },
                Node { id: 2, alias: "Node2".to_string(), balance: 20, channels: Vec::new() },
            ],
        }
    }

    struct FailingSink;

    impl DocumentSink for FailingSink {
        fn write_document(self, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_topology_only_layout() {
        let mut out: Vec<u8> = Vec::new();
        emit(small_map(), EmitMode::TopologyOnly, OutputFormat::Compact, WriterSink(&mut out)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"Nodes":[{"id":"1","alias":"Node1","balance":"10","channels":["#,
                r#"{"id":"1","from":"1","to":"2","capacity":"50","fee":"3","transactions":[]}]},"#,
                r#"{"id":"2","alias":"Node2","balance":"20","channels":[]}]}"#
            )
        );
    }

    #[test]
    fn test_results_appended_after_nodes() {
        let map = small_map();
        let channels: Vec<Channel> = map.channels().cloned().collect();
        let summary = aggregate(&map.nodes, &channels, &SimulationCounters::default()).unwrap();

        let mut out: Vec<u8> = Vec::new();
        let document = emit(map, EmitMode::WithResults(summary), OutputFormat::Compact, WriterSink(&mut out)).unwrap();
        assert!(document.has_results());

        let text = String::from_utf8(out).unwrap();
        let nodes_at = text.find("\"Nodes\"").unwrap();
        let results_at = text.find("\"Results\"").unwrap();
        assert!(nodes_at < results_at);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["Results"].as_array().unwrap().len(), 1);
        assert_eq!(value["Results"][0]["Network Balance"], "30");
        assert_eq!(value["Results"][0]["Fees"], "3");
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let result = emit(small_map(), EmitMode::TopologyOnly, OutputFormat::Compact, FailingSink);
        assert!(matches!(result, Err(MapError::SinkWriteFailure(_))));
    }

    #[test]
    fn test_atomic_file_sink_writes_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("custom.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "old").unwrap();

        emit(small_map(), EmitMode::TopologyOnly, OutputFormat::Pretty, AtomicFileSink::new(&path)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["Nodes"].as_array().unwrap().len(), 2);
        assert!(value.get("Results").is_none());

        // Only the final file remains, no stray temp files
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_atomic_file_sink_missing_parent_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("map.json");
        AtomicFileSink::new(&path).write_document(b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
