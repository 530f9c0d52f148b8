//! # Cluster Controller
//!
//! Root façade of the conductor. Owns exactly one [`ClusterManager`], the
//! shared [`ContextSession`], and the outbound [`ClusterDriver`] handle, and
//! is the only place clusters are constructed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cluster_conductor::{ClusterConfig, ClusterController, ClusterDriver};
//!
//! # async fn example(driver: Arc<dyn ClusterDriver>) -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ClusterController::new(driver);
//!
//! let cluster = controller.register_cluster(&ClusterConfig::new("/cfg/source"));
//! cluster.request_manager().set_request_processor(|request: PingRequest| async move {
//!     Ok(format!("pinged {}", request.target))
//! });
//!
//! let response = cluster.process_cluster_request(Box::new(PingRequest {
//!     target: "api".to_string(),
//! })).await?;
//! # Ok(())
//! # }
//! # #[derive(Debug)]
//! # struct PingRequest { target: String }
//! ```

use std::sync::Arc;

use tracing::info;

use crate::cluster::{Cluster, ClusterMetaData};
use crate::config::ConductorConfig;
use crate::context::{ContextManager, ContextSession};
use crate::driver::ClusterDriver;
use crate::registry::ClusterManager;

/// Configuration for registering a cluster. The config path doubles as the
/// cluster uid; in-cluster registrations map to the conductor's own cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    config_path: String,
    in_cluster: bool,
}

impl ClusterConfig {
    pub fn new(config_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            in_cluster: false,
        }
    }

    /// Mark this registration as the cluster the conductor itself runs in.
    pub fn in_cluster(mut self) -> Self {
        self.in_cluster = true;
        self
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }
}

/// Root façade owning the cluster registry and the shared context session.
pub struct ClusterController {
    cluster_manager: ClusterManager,
    session: ContextSession,
    driver: Arc<dyn ClusterDriver>,
    config: ConductorConfig,
}

impl ClusterController {
    pub fn new(driver: Arc<dyn ClusterDriver>) -> Self {
        Self::with_config(driver, ConductorConfig::default())
    }

    pub fn with_config(driver: Arc<dyn ClusterDriver>, config: ConductorConfig) -> Self {
        Self {
            cluster_manager: ClusterManager::new(),
            session: ContextSession::new(),
            driver,
            config,
        }
    }

    pub fn cluster_manager(&self) -> &ClusterManager {
        &self.cluster_manager
    }

    pub fn session(&self) -> &ContextSession {
        &self.session
    }

    pub fn config(&self) -> &ConductorConfig {
        &self.config
    }

    /// Register the cluster described by `cluster_config`, or return the
    /// already-registered instance for the same uid (registration is
    /// idempotent). The lookup and insert run as one critical section, so
    /// concurrent registrations of the same uid always share one cluster
    /// instance and one lock. The new cluster's context manager shares this
    /// controller's session and driver.
    pub fn register_cluster(&self, cluster_config: &ClusterConfig) -> Arc<Cluster> {
        let config_path = if cluster_config.in_cluster {
            self.config.in_cluster_config_path.clone()
        } else {
            cluster_config.config_path.clone()
        };
        let metadata = ClusterMetaData::new(config_path);
        let cluster_uid = metadata.cluster_uid().to_string();

        self.cluster_manager.get_or_record_cluster(&cluster_uid, || {
            let context_manager = ContextManager::new(
                metadata.config_path(),
                self.session.clone(),
                Arc::clone(&self.driver),
            );
            info!(cluster = %cluster_uid, "registered cluster");
            Arc::new(Cluster::new(metadata.clone(), context_manager))
        })
    }

    /// The live cluster for `cluster_uid`, or `None` when absent or removed.
    pub fn cluster(&self, cluster_uid: &str) -> Option<Arc<Cluster>> {
        self.cluster_manager.get_cluster(cluster_uid)
    }

    /// Archive the live cluster for `cluster_uid`.
    pub fn remove_cluster(&self, cluster_uid: &str) -> Option<Arc<Cluster>> {
        self.cluster_manager.remove_cluster(cluster_uid)
    }
}
