//! Topology parameter validation.
//!
//! This module rejects generator parameters for which no valid network
//! map exists, before any random draw is made.

use crate::error::MapError;
use crate::topology::types::AttributeBounds;

/// Validate node count, channels per node and attribute bounds
///
/// Checks for:
/// - At least one node
/// - At least two nodes when channels are requested (a channel never loops back to its owner)
/// - A total channel count that fits the `u32` channel id space
/// - Non-empty ranges for balance, capacity and fee draws
///
/// # Arguments
/// * `node_count` - Number of nodes to generate
/// * `channels_per_node` - Outgoing channels generated for each node
/// * `bounds` - Exclusive upper bounds for the random attributes
///
/// # Examples
/// ```
/// use lnsim_netgen::utils::validation::validate_topology_params;
/// use lnsim_netgen::topology::AttributeBounds;
///
/// assert!(validate_topology_params(5, 2, &AttributeBounds::default()).is_ok());
/// assert!(validate_topology_params(1, 1, &AttributeBounds::default()).is_err());
/// ```
pub fn validate_topology_params(
    node_count: u32,
    channels_per_node: u32,
    bounds: &AttributeBounds,
) -> Result<(), MapError> {
    if node_count == 0 {
        return Err(MapError::invalid("node count must be at least 1"));
    }

    if node_count < 2 && channels_per_node > 0 {
        return Err(MapError::invalid(format!(
            "{} channels per node requested but a network of {} node has no valid channel target",
            channels_per_node, node_count
        )));
    }

    let total_channels = u64::from(node_count) * u64::from(channels_per_node);
    if total_channels > u64::from(u32::MAX) {
        return Err(MapError::invalid(format!(
            "{} nodes with {} channels each exceed the {} channel id limit",
            node_count,
            channels_per_node,
            u32::MAX
        )));
    }

    if bounds.max_balance == 0 {
        return Err(MapError::invalid("max_balance must be at least 1"));
    }
    if bounds.max_capacity == 0 {
        return Err(MapError::invalid("max_capacity must be at least 1"));
    }
    if bounds.max_fee == 0 {
        return Err(MapError::invalid("max_fee must be at least 1"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_nodes_rejected() {
        let err = validate_topology_params(0, 0, &AttributeBounds::default()).unwrap_err();
        assert!(matches!(err, MapError::InvalidTopologyParameters { .. }));
    }

    #[test]
    fn test_single_node() {
        // A lone node is fine as long as it has no channels
        assert!(validate_topology_params(1, 0, &AttributeBounds::default()).is_ok());
        assert!(validate_topology_params(1, 3, &AttributeBounds::default()).is_err());
    }

    #[test]
    fn test_two_nodes_accepted() {
        assert!(validate_topology_params(2, 4, &AttributeBounds::default()).is_ok());
    }

    #[test]
    fn test_channel_total_limit() {
        let bounds = AttributeBounds::default();
        assert!(validate_topology_params(u32::MAX, 1, &bounds).is_ok());
        assert!(validate_topology_params(u32::MAX, 2, &bounds).is_err());
        assert!(validate_topology_params(65_536, 65_536, &bounds).is_err());
        assert!(validate_topology_params(65_535, 65_537, &bounds).is_ok());
    }

    #[test]
    fn test_empty_ranges_rejected() {
        let bounds = AttributeBounds { max_fee: 0, ..AttributeBounds::default() };
        assert!(validate_topology_params(3, 1, &bounds).is_err());

        let bounds = AttributeBounds { max_capacity: 0, ..AttributeBounds::default() };
        assert!(validate_topology_params(3, 1, &bounds).is_err());

        let bounds = AttributeBounds { max_balance: 0, ..AttributeBounds::default() };
        assert!(validate_topology_params(3, 1, &bounds).is_err());
    }
}
