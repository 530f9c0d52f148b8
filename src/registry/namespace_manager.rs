//! # Namespace Manager
//!
//! Registry of the namespaces recorded for a cluster. Each namespace owns its
//! own app and pod registries, giving the tree its hierarchical shape:
//! conductor → clusters → namespaces → apps/pods.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::app_manager::AppManager;
use crate::registry::pod_manager::PodManager;
use crate::registry::soft_delete::{ArchivedEntry, SoftDeleteRegistry};

/// Metadata identifying a namespace. Immutable once built; the uid is the
/// namespace name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMetaData {
    namespace: String,
}

impl NamespaceMetaData {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn namespace_uid(&self) -> &str {
        &self.namespace
    }
}

/// A recorded namespace, exclusively owning its app and pod registries.
pub struct Namespace {
    app_manager: AppManager,
    pod_manager: PodManager,
}

impl Namespace {
    pub fn new() -> Self {
        Self {
            app_manager: AppManager::new(),
            pod_manager: PodManager::new(),
        }
    }

    pub fn app_manager(&self) -> &AppManager {
        &self.app_manager
    }

    pub fn pod_manager(&self) -> &PodManager {
        &self.pod_manager
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cluster namespace registry with soft delete.
pub struct NamespaceManager {
    namespaces: SoftDeleteRegistry<Namespace>,
}

impl NamespaceManager {
    pub fn new() -> Self {
        Self {
            namespaces: SoftDeleteRegistry::new(),
        }
    }

    pub fn get_namespace(&self, namespace_uid: &str) -> Option<Arc<Namespace>> {
        self.namespaces.get(namespace_uid)
    }

    pub fn is_namespace_present(&self, namespace_uid: &str) -> bool {
        self.namespaces.is_present(namespace_uid)
    }

    pub fn set_namespace(&self, namespace_uid: impl Into<String>, namespace: Arc<Namespace>) {
        self.namespaces.set(namespace_uid, namespace);
    }

    /// Fetch the namespace, recording an empty one first if absent. Atomic,
    /// so concurrent recorders of the same namespace share one instance.
    pub fn get_or_record_namespace(&self, namespace_uid: &str) -> Arc<Namespace> {
        self.namespaces
            .get_or_insert_with(namespace_uid, || Arc::new(Namespace::new()))
    }

    pub fn delete_namespace(&self, namespace_uid: &str) {
        self.namespaces.delete(namespace_uid);
    }

    pub fn remove_namespace(&self, namespace_uid: &str) -> Option<Arc<Namespace>> {
        self.namespaces.remove(namespace_uid)
    }

    pub fn removed_namespaces(&self, namespace_uid: &str) -> Vec<ArchivedEntry<Namespace>> {
        self.namespaces.removed_history(namespace_uid)
    }

    pub fn namespace_uids(&self) -> Vec<String> {
        self.namespaces.live_uids()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}
