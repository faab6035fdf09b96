//! Network map type definitions.
//!
//! Nodes own their outgoing channels, mirroring the layout of the
//! `"Nodes"` section of the emitted document. Field order here is the
//! serialization order and must stay stable.

use serde::{Deserialize, Serialize};

use crate::traffic::Transaction;
use crate::utils::decimal_string;

/// A participant in the generated network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(with = "decimal_string")]
    pub id: u32,
    pub alias: String,
    #[serde(with = "decimal_string")]
    pub balance: u64,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Node {
    /// Display label for the node at 1-based position `position`
    pub fn alias_for(position: u32) -> String {
        format!("Node{}", position)
    }
}

/// A directed payment channel from one node to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(with = "decimal_string")]
    pub id: u32,
    #[serde(with = "decimal_string")]
    pub from: u32,
    #[serde(with = "decimal_string")]
    pub to: u32,
    #[serde(with = "decimal_string")]
    pub capacity: u64,
    #[serde(with = "decimal_string")]
    pub fee: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Exclusive upper bounds for the randomly drawn attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBounds {
    #[serde(default = "default_max_balance")]
    pub max_balance: u64,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    #[serde(default = "default_max_fee")]
    pub max_fee: u64,
}

fn default_max_balance() -> u64 {
    1000
}

fn default_max_capacity() -> u64 {
    100
}

fn default_max_fee() -> u64 {
    7
}

impl Default for AttributeBounds {
    fn default() -> Self {
        Self {
            max_balance: default_max_balance(),
            max_capacity: default_max_capacity(),
            max_fee: default_max_fee(),
        }
    }
}

/// A generated network: nodes in id order, each with its channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkMap {
    pub nodes: Vec<Node>,
}

impl NetworkMap {
    /// All channels in node-then-slot order
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.nodes.iter().flat_map(|node| node.channels.iter())
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut Channel> {
        self.nodes.iter_mut().flat_map(|node| node.channels.iter_mut())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn channel_count(&self) -> usize {
        self.nodes.iter().map(|node| node.channels.len()).sum()
    }
}
