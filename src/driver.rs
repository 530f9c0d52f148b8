//! # Cluster Driver Seam
//!
//! Outbound collaborator interface used during a context switch. The real
//! implementation wraps the scheduler, volume, and node drivers of the
//! orchestration tool; tests substitute a recording mock.

use async_trait::async_trait;

/// Side-effecting operations a context switch performs against the remote
/// tooling. All operations are opaque and fallible; any failure aborts the
/// switch and surfaces as a `ConfigSwitch` error.
#[async_trait]
pub trait ClusterDriver: Send + Sync {
    /// Point the underlying tooling at the cluster named by `config_path`,
    /// reloading credentials as needed.
    async fn set_config(&self, config_path: &str) -> anyhow::Result<()>;

    /// Rebuild the node registry for the newly active cluster.
    async fn refresh_node_registry(&self) -> anyhow::Result<()>;

    /// Re-resolve driver endpoints for the newly active cluster.
    async fn refresh_driver_endpoints(&self) -> anyhow::Result<()>;

    /// Re-establish the command transport. SSH-based transports re-dial here;
    /// the default is a no-op for transports with no connection state.
    async fn refresh_transport(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
