//! Random topology generation.
//!
//! Builds `node_count` nodes with sequential ids starting at 1 and gives each
//! of them `channels_per_node` outgoing channels to randomly chosen peers.
//! All randomness comes from the caller's generator, so a seeded generator
//! reproduces the same map.

use log::{debug, info};
use rand::Rng;

use crate::error::MapError;
use crate::topology::types::{AttributeBounds, Channel, NetworkMap, Node};
use crate::utils::validation::validate_topology_params;

/// Builder for randomly connected network maps
#[derive(Debug, Clone)]
pub struct RandomTopologyBuilder {
    node_count: u32,
    channels_per_node: u32,
    bounds: AttributeBounds,
}

impl RandomTopologyBuilder {
    pub fn new(node_count: u32, channels_per_node: u32) -> Self {
        Self {
            node_count,
            channels_per_node,
            bounds: AttributeBounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: AttributeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Generate the network map.
    ///
    /// Per node the draws happen in a fixed order: balance, then for each
    /// channel its target, capacity and fee. Channel ids are a single counter
    /// running across all nodes.
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidTopologyParameters` when no valid map exists
    /// for the requested sizes or bounds.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<NetworkMap, MapError> {
        validate_topology_params(self.node_count, self.channels_per_node, &self.bounds)?;

        info!(
            "Generating network of {} nodes with {} channels per node",
            self.node_count, self.channels_per_node
        );

        let mut nodes = Vec::with_capacity(self.node_count as usize);
        let mut channel_id = 0u32;

        for id in 1..=self.node_count {
            let balance = rng.gen_range(0..self.bounds.max_balance);
            let mut channels = Vec::with_capacity(self.channels_per_node as usize);

            for _ in 0..self.channels_per_node {
                channel_id += 1;
                let to = pick_target(rng, id, self.node_count);
                let capacity = rng.gen_range(0..self.bounds.max_capacity);
                let fee = rng.gen_range(0..self.bounds.max_fee);

                debug!("Channel {}: {} -> {} (capacity {}, fee {})", channel_id, id, to, capacity, fee);

                channels.push(Channel {
                    id: channel_id,
                    from: id,
                    to,
                    capacity,
                    fee,
                    transactions: Vec::new(),
                });
            }

            nodes.push(Node {
                id,
                alias: Node::alias_for(id),
                balance,
                channels,
            });
        }

        info!("Generated {} nodes and {} channels", nodes.len(), channel_id);
        Ok(NetworkMap { nodes })
    }
}

/// Pick a channel target uniformly from `{1..=node_count} \ {from}`.
///
/// Draws an index among the `node_count - 1` other nodes and shifts it past
/// the source id, so it never needs to retry. Requires `node_count >= 2`.
fn pick_target<R: Rng + ?Sized>(rng: &mut R, from: u32, node_count: u32) -> u32 {
    let candidate = rng.gen_range(1..node_count);
    if candidate >= from {
        candidate + 1
    } else {
        candidate
    }
}
