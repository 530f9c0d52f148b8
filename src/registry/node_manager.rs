//! Registry of the worker nodes known for a cluster.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::soft_delete::{ArchivedEntry, SoftDeleteRegistry};

/// A worker node of a registered cluster. Addresses and usability come from
/// the node driver at refresh time; the conductor only records them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub addresses: Vec<String>,
    pub usable: bool,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addresses: Vec::new(),
            usable: true,
        }
    }

    pub fn with_addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = addresses;
        self
    }

    /// Node uid; node names are unique within a cluster.
    pub fn node_uid(&self) -> &str {
        &self.name
    }
}

/// Per-cluster node registry with soft delete.
pub struct NodeManager {
    nodes: SoftDeleteRegistry<Node>,
}

impl NodeManager {
    pub fn new() -> Self {
        Self {
            nodes: SoftDeleteRegistry::new(),
        }
    }

    pub fn get_node(&self, node_uid: &str) -> Option<Arc<Node>> {
        self.nodes.get(node_uid)
    }

    pub fn is_node_present(&self, node_uid: &str) -> bool {
        self.nodes.is_present(node_uid)
    }

    pub fn set_node(&self, node_uid: impl Into<String>, node: Arc<Node>) {
        self.nodes.set(node_uid, node);
    }

    pub fn delete_node(&self, node_uid: &str) {
        self.nodes.delete(node_uid);
    }

    pub fn remove_node(&self, node_uid: &str) -> Option<Arc<Node>> {
        self.nodes.remove(node_uid)
    }

    pub fn removed_nodes(&self, node_uid: &str) -> Vec<ArchivedEntry<Node>> {
        self.nodes.removed_history(node_uid)
    }

    pub fn node_uids(&self) -> Vec<String> {
        self.nodes.live_uids()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_lifecycle() {
        let manager = NodeManager::new();
        let node = Arc::new(Node::new("node-0").with_addresses(vec!["10.0.0.1".to_string()]));
        manager.set_node(node.node_uid().to_string(), Arc::clone(&node));

        assert!(manager.is_node_present("node-0"));
        assert_eq!(manager.get_node("node-0").unwrap().addresses, ["10.0.0.1"]);

        manager.remove_node("node-0");
        assert!(!manager.is_node_present("node-0"));
        assert_eq!(manager.removed_nodes("node-0").len(), 1);
    }
}
