#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Cluster Conductor
//!
//! Concurrency-safe, multi-tenant cluster registry and command-dispatch engine
//! for test orchestration.
//!
//! ## Overview
//!
//! Test code running in one process issues commands against many independent
//! remote clusters. The conductor guarantees that commands against one cluster
//! never interfere with commands against another, that two commands against
//! the *same* cluster never race, and that new command kinds can be added
//! generically without a growing central switch statement.
//!
//! The conductor implements no business logic of its own: scheduling
//! workloads, taking backups, and the like live in registered request
//! processors and in the driver behind the [`ClusterDriver`] seam.
//!
//! ## Module Organization
//!
//! - [`controller`] - Root façade owning the cluster registry
//! - [`cluster`] - The unit of mutual exclusion and its serialized entry point
//! - [`context`] - Active-configuration session and context switching
//! - [`dispatch`] - Type-keyed, extensible request dispatch
//! - [`registry`] - Hierarchical soft-delete registries
//! - [`resilience`] - Bounded retry for asynchronous remote conditions
//! - [`driver`] - Outbound collaborator seam
//! - [`error`] - Tagged error taxonomy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cluster_conductor::{ClusterConfig, ClusterController, ClusterDriver};
//!
//! # #[derive(Debug)]
//! # struct StatusRequest;
//! # async fn example(driver: Arc<dyn ClusterDriver>) -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ClusterController::new(driver);
//!
//! // Register two independent clusters; each is addressed by its config path.
//! let source = controller.register_cluster(&ClusterConfig::new("/cfg/source"));
//! let target = controller.register_cluster(&ClusterConfig::new("/cfg/target"));
//!
//! source.request_manager().set_request_processor(|_request: StatusRequest| async move {
//!     Ok("healthy")
//! });
//!
//! // Serialized per cluster, concurrent across clusters.
//! let response = source.process_cluster_request(Box::new(StatusRequest)).await?;
//! # Ok(())
//! # }
//! ```

pub mod cluster;
pub mod config;
pub mod context;
pub mod controller;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod logging;
pub mod registry;
pub mod resilience;

pub use cluster::{Cluster, ClusterMetaData};
pub use config::{ConductorConfig, IN_CLUSTER_CONFIG_PATH};
pub use context::{ContextManager, ContextSession};
pub use controller::{ClusterConfig, ClusterController};
pub use dispatch::{Request, RequestManager, Response};
pub use driver::ClusterDriver;
pub use error::{ConductorError, Result};
pub use logging::init_logging;
pub use registry::{
    App, AppManager, AppMetaData, ArchivedEntry, ClusterManager, Namespace, NamespaceManager,
    NamespaceMetaData, Node, NodeManager, Pod, PodManager, SoftDeleteRegistry,
};
pub use resilience::do_retry_with_timeout;
