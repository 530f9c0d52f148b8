//! # Cluster
//!
//! The unit of mutual exclusion. A `Cluster` exclusively owns its context
//! manager, request manager, namespace registry, and node registry, and
//! exposes the single serialized entry point [`Cluster::process_cluster_request`].
//!
//! ## Guarantees
//!
//! At most one request is between context switch and handler completion per
//! cluster at any instant; requests against different clusters run fully
//! concurrently. Requests on one cluster complete in lock-acquisition order
//! (no fairness guarantee beyond the underlying mutex). Every failure
//! propagates verbatim to the caller; there is no rollback, so handlers must
//! be authored idempotent.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::context::ContextManager;
use crate::dispatch::{Request, RequestManager, Response};
use crate::error::Result;
use crate::registry::{NamespaceManager, NodeManager};

/// Metadata identifying a cluster. Immutable once built; the uid is the
/// config path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMetaData {
    config_path: String,
}

impl ClusterMetaData {
    pub fn new(config_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    pub fn cluster_uid(&self) -> &str {
        &self.config_path
    }
}

/// A registered remote cluster.
///
/// The context manager lives inside the cluster's async mutex: holding the
/// lock while switching context and dispatching is exactly what serializes
/// requests and makes mutation of the shared active-configuration session
/// safe.
pub struct Cluster {
    metadata: ClusterMetaData,
    context_manager: Mutex<ContextManager>,
    request_manager: RequestManager,
    namespace_manager: NamespaceManager,
    node_manager: NodeManager,
}

impl Cluster {
    pub fn new(metadata: ClusterMetaData, context_manager: ContextManager) -> Self {
        Self {
            metadata,
            context_manager: Mutex::new(context_manager),
            request_manager: RequestManager::new(),
            namespace_manager: NamespaceManager::new(),
            node_manager: NodeManager::new(),
        }
    }

    pub fn metadata(&self) -> &ClusterMetaData {
        &self.metadata
    }

    /// Registration surface for new command kinds. Usable at construction
    /// time or any time after.
    pub fn request_manager(&self) -> &RequestManager {
        &self.request_manager
    }

    pub fn namespace_manager(&self) -> &NamespaceManager {
        &self.namespace_manager
    }

    pub fn node_manager(&self) -> &NodeManager {
        &self.node_manager
    }

    /// Process one request against this cluster, under the cluster's lock:
    ///
    /// 1. acquire the exclusive lock;
    /// 2. switch the active context to this cluster's configuration; on
    ///    failure the request is never dispatched;
    /// 3. dispatch by the request's runtime type;
    /// 4. release the lock and return the handler's result.
    pub async fn process_cluster_request(&self, request: Box<dyn Request>) -> Result<Response> {
        let kind = (*request).kind();
        let correlation_id = Uuid::new_v4();
        let cluster_uid = self.metadata.cluster_uid();

        debug!(%correlation_id, cluster = %cluster_uid, kind, "waiting for cluster lock");
        let mut context_manager = self.context_manager.lock().await;
        debug!(%correlation_id, cluster = %cluster_uid, kind, "acquired cluster lock");

        context_manager.switch_context().await?;

        let started = Instant::now();
        let result = self.request_manager.process_request(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => {
                info!(%correlation_id, cluster = %cluster_uid, kind, elapsed_ms, "cluster request processed");
            }
            Err(e) => {
                error!(%correlation_id, cluster = %cluster_uid, kind, elapsed_ms, error = %e, "cluster request failed");
            }
        }

        result
    }
}
