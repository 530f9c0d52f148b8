//! # Hierarchical Registries
//!
//! Thread-safe registries with soft delete for every entity kind the
//! conductor tracks. Removal archives an entity into a parallel removed
//! history instead of destroying it, so a run can always be audited after the
//! fact.
//!
//! ## Architecture
//!
//! ```text
//! ClusterController
//! └── ClusterManager            (uid = config path -> Cluster)
//!     └── Cluster
//!         ├── NodeManager       (node name -> Node)
//!         └── NamespaceManager  (namespace -> Namespace)
//!             ├── AppManager    (app key -> App)
//!             └── PodManager    (pod name -> Pod)
//! ```
//!
//! All registries share one contract: `get` returns `Option<Arc<T>>`,
//! `is_present` checks under a read lock, `set` is last-writer-wins, `delete`
//! discards, and `remove` archives in a single critical section.

pub mod app_manager;
pub mod cluster_manager;
pub mod namespace_manager;
pub mod node_manager;
pub mod pod_manager;
pub mod soft_delete;

pub use app_manager::{App, AppManager, AppMetaData};
pub use cluster_manager::ClusterManager;
pub use namespace_manager::{Namespace, NamespaceManager, NamespaceMetaData};
pub use node_manager::{Node, NodeManager};
pub use pod_manager::{Pod, PodManager};
pub use soft_delete::{ArchivedEntry, SoftDeleteRegistry};
