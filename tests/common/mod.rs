//! Shared fixtures for the integration suite: a recording cluster driver and
//! the request/response types a scheduling collaborator would define.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use cluster_conductor::ClusterDriver;

/// Driver that records every credential reload and can be told to fail it.
#[derive(Default)]
pub struct MockDriver {
    pub set_configs: Mutex<Vec<String>>,
    pub fail_set_config: AtomicBool,
}

impl MockDriver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_config_calls(&self) -> Vec<String> {
        self.set_configs.lock().clone()
    }
}

#[async_trait]
impl ClusterDriver for MockDriver {
    async fn set_config(&self, config_path: &str) -> anyhow::Result<()> {
        if self.fail_set_config.load(Ordering::SeqCst) {
            anyhow::bail!("credentials unavailable for [{config_path}]");
        }
        self.set_configs.lock().push(config_path.to_string());
        Ok(())
    }

    async fn refresh_node_registry(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn refresh_driver_endpoints(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Request a scheduling collaborator would register a processor for.
#[derive(Debug, Clone)]
pub struct ScheduleAppRequest {
    pub app_key: String,
    pub namespace: String,
    pub instance_id: String,
}

/// Opaque handles the scheduler hands back for later validation and teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleAppResponse {
    pub contexts: Vec<String>,
}
