//! # Cluster Manager
//!
//! Registry of the remote clusters a conductor controls: at most one live
//! cluster per uid, removed clusters archived per uid in arrival order.

use std::sync::Arc;

use tracing::info;

use crate::cluster::Cluster;
use crate::registry::soft_delete::{ArchivedEntry, SoftDeleteRegistry};

/// Top-level cluster registry with soft delete.
pub struct ClusterManager {
    clusters: SoftDeleteRegistry<Cluster>,
}

impl ClusterManager {
    pub fn new() -> Self {
        Self {
            clusters: SoftDeleteRegistry::new(),
        }
    }

    pub fn get_cluster(&self, cluster_uid: &str) -> Option<Arc<Cluster>> {
        self.clusters.get(cluster_uid)
    }

    pub fn is_cluster_present(&self, cluster_uid: &str) -> bool {
        self.clusters.is_present(cluster_uid)
    }

    pub fn set_cluster(&self, cluster_uid: impl Into<String>, cluster: Arc<Cluster>) {
        let cluster_uid = cluster_uid.into();
        info!(cluster = %cluster_uid, "recording cluster");
        self.clusters.set(cluster_uid, cluster);
    }

    /// The live cluster for `cluster_uid`, building and recording the result
    /// of `make` under the write lock when absent. Atomic, so concurrent
    /// registrations of the same uid share one instance.
    pub fn get_or_record_cluster(
        &self,
        cluster_uid: &str,
        make: impl FnOnce() -> Arc<Cluster>,
    ) -> Arc<Cluster> {
        self.clusters.get_or_insert_with(cluster_uid, make)
    }

    pub fn delete_cluster(&self, cluster_uid: &str) {
        self.clusters.delete(cluster_uid);
    }

    /// Archive the live cluster for `cluster_uid`. Its request and namespace
    /// state stay reachable through the removed history.
    pub fn remove_cluster(&self, cluster_uid: &str) -> Option<Arc<Cluster>> {
        let removed = self.clusters.remove(cluster_uid);
        if removed.is_some() {
            info!(cluster = %cluster_uid, "cluster moved to removed history");
        }
        removed
    }

    pub fn removed_clusters(&self, cluster_uid: &str) -> Vec<ArchivedEntry<Cluster>> {
        self.clusters.removed_history(cluster_uid)
    }

    pub fn cluster_uids(&self) -> Vec<String> {
        self.clusters.live_uids()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl Default for ClusterManager {
    fn default() -> Self {
        Self::new()
    }
}
