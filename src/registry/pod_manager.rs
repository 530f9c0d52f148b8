//! Registry of the pods recorded in a namespace.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::soft_delete::{ArchivedEntry, SoftDeleteRegistry};

/// A pod observed in a namespace, recorded by the handlers that scheduled or
/// inspected it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub node: Option<String>,
}

impl Pod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node: None,
        }
    }

    pub fn on_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn pod_uid(&self) -> &str {
        &self.name
    }
}

/// Per-namespace pod registry with soft delete.
pub struct PodManager {
    pods: SoftDeleteRegistry<Pod>,
}

impl PodManager {
    pub fn new() -> Self {
        Self {
            pods: SoftDeleteRegistry::new(),
        }
    }

    pub fn get_pod(&self, pod_uid: &str) -> Option<Arc<Pod>> {
        self.pods.get(pod_uid)
    }

    pub fn is_pod_present(&self, pod_uid: &str) -> bool {
        self.pods.is_present(pod_uid)
    }

    pub fn set_pod(&self, pod_uid: impl Into<String>, pod: Arc<Pod>) {
        self.pods.set(pod_uid, pod);
    }

    pub fn delete_pod(&self, pod_uid: &str) {
        self.pods.delete(pod_uid);
    }

    pub fn remove_pod(&self, pod_uid: &str) -> Option<Arc<Pod>> {
        self.pods.remove(pod_uid)
    }

    pub fn removed_pods(&self, pod_uid: &str) -> Vec<ArchivedEntry<Pod>> {
        self.pods.removed_history(pod_uid)
    }

    pub fn pod_uids(&self) -> Vec<String> {
        self.pods.live_uids()
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }
}

impl Default for PodManager {
    fn default() -> Self {
        Self::new()
    }
}
