//! # Request Manager
//!
//! Dispatch table keyed by the runtime type of the request.
//!
//! ## Overview
//!
//! A processor registered for request type `R` is invoked for every request
//! whose concrete type is `R`; the mapping is open-ended, so collaborators add
//! command kinds without write access to this module. The price of runtime
//! keying is the loss of compile-time exhaustiveness: dispatching a type
//! nobody registered is only caught at runtime, as a distinct
//! [`ConductorError::DispatchMiss`] error.
//!
//! ## Usage
//!
//! ```rust
//! use cluster_conductor::dispatch::RequestManager;
//!
//! #[derive(Debug)]
//! struct PingRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = RequestManager::new();
//! manager.set_request_processor(|_request: PingRequest| async { Ok("pong") });
//!
//! let response = manager.process_request(Box::new(PingRequest)).await?;
//! assert_eq!(*response.downcast::<&str>().unwrap(), "pong");
//! # Ok(())
//! # }
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{ConductorError, Result};

/// A dispatchable command payload. Blanket-implemented for every sendable,
/// debuggable type, so callers define plain structs and never implement this
/// by hand. `kind` names the concrete type for diagnostics and dispatch-miss
/// errors.
pub trait Request: Send + fmt::Debug + 'static {
    fn kind(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T> Request for T
where
    T: Send + fmt::Debug + 'static,
{
    fn kind(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Opaque processor result; callers downcast to the concrete response type
/// paired with the request kind they sent.
pub type Response = Box<dyn Any + Send>;

type ProcessorFn =
    Arc<dyn Fn(Box<dyn Request>) -> BoxFuture<'static, anyhow::Result<Response>> + Send + Sync>;

struct RegisteredProcessor {
    kind: &'static str,
    run: ProcessorFn,
}

/// Type-keyed dispatch table. One per cluster; registration may happen at
/// cluster construction or any time later.
pub struct RequestManager {
    processors: RwLock<HashMap<TypeId, RegisteredProcessor>>,
}

impl RequestManager {
    pub fn new() -> Self {
        Self {
            processors: RwLock::new(HashMap::new()),
        }
    }

    /// Register `processor` for requests of concrete type `R`.
    ///
    /// Re-registering a type replaces the previous processor (last writer
    /// wins, logged as a warning).
    pub fn set_request_processor<R, T, F, Fut>(&self, processor: F)
    where
        R: Send + fmt::Debug + 'static,
        T: Send + 'static,
        F: Fn(R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let run: ProcessorFn = Arc::new(move |request: Box<dyn Request>| {
            match request.into_any().downcast::<R>() {
                Ok(request) => {
                    let fut = processor(*request);
                    async move { fut.await.map(|value| Box::new(value) as Response) }.boxed()
                }
                // Unreachable while dispatch keys on TypeId, but a graceful
                // error beats a panic if that invariant ever breaks.
                Err(_) => async move {
                    Err(anyhow::anyhow!(
                        "request payload does not match its registered type"
                    ))
                }
                .boxed(),
            }
        });

        let kind = std::any::type_name::<R>();
        let mut processors = self.processors.write();
        if processors
            .insert(TypeId::of::<R>(), RegisteredProcessor { kind, run })
            .is_some()
        {
            warn!(kind, "replacing existing request processor");
        } else {
            debug!(kind, "registered request processor");
        }
    }

    /// Whether a processor is registered for request type `R`.
    pub fn has_processor<R: 'static>(&self) -> bool {
        self.processors.read().contains_key(&TypeId::of::<R>())
    }

    /// The kinds currently registered, for diagnostics.
    pub fn registered_kinds(&self) -> Vec<&'static str> {
        self.processors.read().values().map(|p| p.kind).collect()
    }

    /// Look up the processor for the request's runtime type and run it.
    ///
    /// An unregistered type is a [`ConductorError::DispatchMiss`]; a processor
    /// failure is wrapped with the wrap site and a field-by-field rendering of
    /// the request.
    pub async fn process_request(&self, request: Box<dyn Request>) -> Result<Response> {
        // Deref before calling: `Box<dyn Request>` is itself Send + Debug +
        // 'static and would satisfy the blanket impl, keying dispatch on the
        // box instead of the payload.
        let kind = (*request).kind();
        let type_id = (*request).as_any().type_id();

        let processor = {
            let processors = self.processors.read();
            processors.get(&type_id).map(|p| Arc::clone(&p.run))
        };

        let Some(run) = processor else {
            return Err(ConductorError::DispatchMiss {
                kind: kind.to_string(),
            });
        };

        let request_dump = format!("{request:#?}");
        run(request)
            .await
            .map_err(|source| ConductorError::handler(kind, request_dump, source))
    }
}

impl Default for RequestManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct ScheduleRequest {
        app_key: String,
        namespace: String,
    }

    #[derive(Debug, PartialEq)]
    struct ScheduleResponse {
        scheduled: String,
    }

    #[derive(Debug)]
    struct UnknownRequest;

    #[tokio::test]
    async fn registered_processor_receives_exactly_the_request() {
        let manager = RequestManager::new();
        manager.set_request_processor(|request: ScheduleRequest| async move {
            Ok(ScheduleResponse {
                scheduled: format!("{}/{}", request.namespace, request.app_key),
            })
        });

        let response = manager
            .process_request(Box::new(ScheduleRequest {
                app_key: "mysql".to_string(),
                namespace: "db".to_string(),
            }))
            .await
            .unwrap();

        let response = response.downcast::<ScheduleResponse>().unwrap();
        assert_eq!(response.scheduled, "db/mysql");
    }

    #[tokio::test]
    async fn unregistered_type_is_a_dispatch_miss() {
        let manager = RequestManager::new();
        manager.set_request_processor(|_request: ScheduleRequest| async { Ok(()) });

        let err = manager
            .process_request(Box::new(UnknownRequest))
            .await
            .unwrap_err();

        match err {
            ConductorError::DispatchMiss { kind } => assert!(kind.contains("UnknownRequest")),
            other => panic!("expected DispatchMiss, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn processor_failure_carries_request_dump() {
        let manager = RequestManager::new();
        manager.set_request_processor(|_request: ScheduleRequest| async {
            Err::<(), _>(anyhow::anyhow!("quota exceeded"))
        });

        let err = manager
            .process_request(Box::new(ScheduleRequest {
                app_key: "postgres".to_string(),
                namespace: "db".to_string(),
            }))
            .await
            .unwrap_err();

        let rendered = err.to_string();
        assert!(rendered.contains("quota exceeded"));
        assert!(rendered.contains("postgres"));
    }

    #[tokio::test]
    async fn last_registration_wins() {
        let manager = RequestManager::new();
        manager.set_request_processor(|_request: ScheduleRequest| async { Ok(1u32) });
        manager.set_request_processor(|_request: ScheduleRequest| async { Ok(2u32) });

        let response = manager
            .process_request(Box::new(ScheduleRequest {
                app_key: "a".to_string(),
                namespace: "b".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(*response.downcast::<u32>().unwrap(), 2);
    }

    #[test]
    fn registered_kinds_reports_type_names() {
        let manager = RequestManager::new();
        assert!(!manager.has_processor::<ScheduleRequest>());
        manager.set_request_processor(|_request: ScheduleRequest| async { Ok(()) });
        assert!(manager.has_processor::<ScheduleRequest>());
        assert!(manager
            .registered_kinds()
            .iter()
            .any(|k| k.contains("ScheduleRequest")));
    }
}
