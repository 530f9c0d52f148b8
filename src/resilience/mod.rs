//! # Resilience
//!
//! Fault-tolerance helpers for operations against remote clusters. Remote
//! conditions (an app reaching running state, a backup finishing) converge
//! asynchronously, so callers poll them through a bounded retry executor
//! rather than assuming a single call settles the matter.

pub mod retry;

pub use retry::do_retry_with_timeout;
