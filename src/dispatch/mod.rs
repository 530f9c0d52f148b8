//! # Request Dispatch
//!
//! Type-keyed, extensible command dispatch. Any collaborator can add new
//! command kinds by registering a processor for its request type; no central
//! switch statement grows as the command surface does.

pub mod request_manager;

pub use request_manager::{Request, RequestManager, Response};
