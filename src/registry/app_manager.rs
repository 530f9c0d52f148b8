//! # App Manager
//!
//! Registry of the applications recorded in a namespace. The conductor does
//! not schedule apps itself; request processors do, and record the outcome
//! here so later validation and teardown can find it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::soft_delete::{ArchivedEntry, SoftDeleteRegistry};

/// Metadata identifying an app. Immutable once built; the uid is the app key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetaData {
    app_key: String,
}

impl AppMetaData {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
        }
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn app_uid(&self) -> &str {
        &self.app_key
    }
}

/// A scheduled application. `record` holds the opaque scheduler handles the
/// scheduling processor returned (contexts, volumes, whatever the driver
/// hands back), kept verbatim for validation and teardown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    metadata: AppMetaData,
    record: serde_json::Value,
}

impl App {
    pub fn new(metadata: AppMetaData) -> Self {
        Self {
            metadata,
            record: serde_json::Value::Null,
        }
    }

    pub fn with_record(mut self, record: serde_json::Value) -> Self {
        self.record = record;
        self
    }

    pub fn metadata(&self) -> &AppMetaData {
        &self.metadata
    }

    pub fn record(&self) -> &serde_json::Value {
        &self.record
    }
}

/// Per-namespace app registry with soft delete.
pub struct AppManager {
    apps: SoftDeleteRegistry<App>,
}

impl AppManager {
    pub fn new() -> Self {
        Self {
            apps: SoftDeleteRegistry::new(),
        }
    }

    pub fn get_app(&self, app_uid: &str) -> Option<Arc<App>> {
        self.apps.get(app_uid)
    }

    pub fn is_app_present(&self, app_uid: &str) -> bool {
        self.apps.is_present(app_uid)
    }

    pub fn set_app(&self, app_uid: impl Into<String>, app: Arc<App>) {
        self.apps.set(app_uid, app);
    }

    pub fn delete_app(&self, app_uid: &str) {
        self.apps.delete(app_uid);
    }

    pub fn remove_app(&self, app_uid: &str) -> Option<Arc<App>> {
        self.apps.remove(app_uid)
    }

    pub fn removed_apps(&self, app_uid: &str) -> Vec<ArchivedEntry<App>> {
        self.apps.removed_history(app_uid)
    }

    pub fn app_uids(&self) -> Vec<String> {
        self.apps.live_uids()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl Default for AppManager {
    fn default() -> Self {
        Self::new()
    }
}
