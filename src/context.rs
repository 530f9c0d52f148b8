//! # Context Management
//!
//! Tracks which remote cluster configuration is active for the conductor's
//! session and swaps it when a cluster with a different configuration is
//! addressed.
//!
//! ## Overview
//!
//! The active configuration is shared mutable state: every cluster in one
//! conductor steers the same underlying tooling. It is therefore carried in an
//! explicit [`ContextSession`] value cloned into every [`ContextManager`],
//! never in process-global state, so two conductors in one process cannot
//! interfere. Each `ContextManager` lives inside its cluster's lock; holding
//! that lock is what makes a switch safe under concurrency.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::IN_CLUSTER_CONFIG_PATH;
use crate::driver::ClusterDriver;
use crate::error::{ConductorError, Result};

/// Shared record of the configuration currently steering the tooling.
///
/// One session exists per `ClusterController`; clones share state. The session
/// starts on the in-cluster configuration, matching a freshly launched run.
#[derive(Clone, Debug)]
pub struct ContextSession {
    active: Arc<Mutex<String>>,
}

impl ContextSession {
    pub fn new() -> Self {
        Self {
            active: Arc::new(Mutex::new(IN_CLUSTER_CONFIG_PATH.to_string())),
        }
    }

    /// The config path that is currently active for this session.
    pub fn active_config_path(&self) -> String {
        self.active.lock().clone()
    }

    pub(crate) fn set_active_config_path(&self, config_path: &str) {
        *self.active.lock() = config_path.to_string();
    }
}

impl Default for ContextSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cluster record of the configuration that must be active before any of
/// the cluster's requests run, plus the logic to swap it in.
pub struct ContextManager {
    dst_config_path: String,
    src_config_path: Option<String>,
    session: ContextSession,
    driver: Arc<dyn ClusterDriver>,
}

impl ContextManager {
    pub fn new(
        dst_config_path: impl Into<String>,
        session: ContextSession,
        driver: Arc<dyn ClusterDriver>,
    ) -> Self {
        Self {
            dst_config_path: dst_config_path.into(),
            src_config_path: None,
            session,
            driver,
        }
    }

    pub fn dst_config_path(&self) -> &str {
        &self.dst_config_path
    }

    /// The configuration that was active before the last successful switch.
    pub fn src_config_path(&self) -> Option<&str> {
        self.src_config_path.as_deref()
    }

    pub fn set_dst_config_path(&mut self, config_path: impl Into<String>) {
        self.dst_config_path = config_path.into();
    }

    /// Ensure the session's active configuration equals `dst_config_path`.
    ///
    /// The real handshake (credential reload, node registry refresh, endpoint
    /// re-resolution, transport re-dial) runs only when the active
    /// configuration differs. Failure of any sub-step fails the whole switch
    /// and leaves the active configuration unspecified; callers must not
    /// assume earlier sub-steps left anything consistent.
    pub async fn switch_context(&mut self) -> Result<()> {
        let active = self.session.active_config_path();
        if active == self.dst_config_path {
            debug!(config_path = %self.dst_config_path, "context already active, skipping switch");
            return Ok(());
        }

        info!(
            from = %active,
            to = %self.dst_config_path,
            "switching cluster context"
        );

        self.driver
            .set_config(&self.dst_config_path)
            .await
            .map_err(|e| ConductorError::config_switch(&self.dst_config_path, e))?;
        self.driver
            .refresh_node_registry()
            .await
            .map_err(|e| ConductorError::config_switch(&self.dst_config_path, e))?;
        self.driver
            .refresh_driver_endpoints()
            .await
            .map_err(|e| ConductorError::config_switch(&self.dst_config_path, e))?;
        self.driver
            .refresh_transport()
            .await
            .map_err(|e| ConductorError::config_switch(&self.dst_config_path, e))?;

        self.src_config_path = Some(active);
        self.session.set_active_config_path(&self.dst_config_path);

        info!(config_path = %self.dst_config_path, "cluster context switched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex as SyncMutex;

    #[derive(Default)]
    struct RecordingDriver {
        calls: SyncMutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingDriver {
        fn failing_on(step: &'static str) -> Self {
            Self {
                calls: SyncMutex::new(Vec::new()),
                fail_on: Some(step),
            }
        }

        fn record(&self, step: &str) -> anyhow::Result<()> {
            self.calls.lock().push(step.to_string());
            if self.fail_on == Some(step) {
                anyhow::bail!("{step} failed");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ClusterDriver for RecordingDriver {
        async fn set_config(&self, config_path: &str) -> anyhow::Result<()> {
            self.record(&format!("set_config:{config_path}"))
        }
        async fn refresh_node_registry(&self) -> anyhow::Result<()> {
            self.record("refresh_node_registry")
        }
        async fn refresh_driver_endpoints(&self) -> anyhow::Result<()> {
            self.record("refresh_driver_endpoints")
        }
        async fn refresh_transport(&self) -> anyhow::Result<()> {
            self.record("refresh_transport")
        }
    }

    #[tokio::test]
    async fn switch_performs_full_handshake_and_updates_session() {
        let driver = Arc::new(RecordingDriver::default());
        let session = ContextSession::new();
        let mut manager = ContextManager::new("/cfg/a", session.clone(), driver.clone());

        manager.switch_context().await.unwrap();

        assert_eq!(session.active_config_path(), "/cfg/a");
        assert_eq!(manager.src_config_path(), Some(IN_CLUSTER_CONFIG_PATH));
        assert_eq!(
            *driver.calls.lock(),
            vec![
                "set_config:/cfg/a",
                "refresh_node_registry",
                "refresh_driver_endpoints",
                "refresh_transport",
            ]
        );
    }

    #[tokio::test]
    async fn switch_is_a_noop_when_already_active() {
        let driver = Arc::new(RecordingDriver::default());
        let session = ContextSession::new();
        session.set_active_config_path("/cfg/a");
        let mut manager = ContextManager::new("/cfg/a", session.clone(), driver.clone());

        manager.switch_context().await.unwrap();

        assert!(driver.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_substep_fails_switch_and_leaves_session_untouched() {
        let driver = Arc::new(RecordingDriver::failing_on("refresh_driver_endpoints"));
        let session = ContextSession::new();
        let mut manager = ContextManager::new("/cfg/b", session.clone(), driver.clone());

        let err = manager.switch_context().await.unwrap_err();
        assert!(matches!(err, ConductorError::ConfigSwitch { .. }));
        assert_eq!(session.active_config_path(), IN_CLUSTER_CONFIG_PATH);
        assert_eq!(manager.src_config_path(), None);
    }
}
