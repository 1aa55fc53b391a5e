//! Handler Shapes
//!
//! The closed set of handler shapes a route can be registered with.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::domain::models::binding::NoInput;

type SyncFn<TIn, TOut> = dyn Fn(TIn) -> anyhow::Result<TOut> + Send + Sync;
type AsyncFn<TIn, TOut> = dyn Fn(TIn) -> BoxFuture<'static, anyhow::Result<TOut>> + Send + Sync;

/// Tag naming a handler's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Sync,
    Async,
    SyncWithModel,
    AsyncWithModel,
}

impl HandlerKind {
    /// Whether handlers of this shape need a bound input model
    #[must_use]
    pub fn requires_model(self) -> bool {
        matches!(self, Self::SyncWithModel | Self::AsyncWithModel)
    }
}

/// A user handler producing `TOut`, optionally from a bound `TIn` model
///
/// Zero-input shapes use `NoInput` as `TIn`.
pub enum Handler<TIn, TOut> {
    Sync(Arc<dyn Fn() -> anyhow::Result<TOut> + Send + Sync>),
    Async(Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<TOut>> + Send + Sync>),
    SyncWithModel(Arc<SyncFn<TIn, TOut>>),
    AsyncWithModel(Arc<AsyncFn<TIn, TOut>>),
}

impl<TOut: 'static> Handler<NoInput, TOut> {
    /// Zero-input synchronous handler
    pub fn sync<F>(handler: F) -> Self
    where
        F: Fn() -> anyhow::Result<TOut> + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(handler))
    }

    /// Zero-input asynchronous handler
    pub fn from_async<F, Fut>(handler: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<TOut>> + Send + 'static,
    {
        Self::Async(Arc::new(move || handler().boxed()))
    }
}

impl<TIn: 'static, TOut: 'static> Handler<TIn, TOut> {
    /// Synchronous handler taking a bound model
    pub fn with_model<F>(handler: F) -> Self
    where
        F: Fn(TIn) -> anyhow::Result<TOut> + Send + Sync + 'static,
    {
        Self::SyncWithModel(Arc::new(handler))
    }

    /// Asynchronous handler taking a bound model
    pub fn with_model_async<F, Fut>(handler: F) -> Self
    where
        F: Fn(TIn) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<TOut>> + Send + 'static,
    {
        Self::AsyncWithModel(Arc::new(move |model: TIn| handler(model).boxed()))
    }

    #[must_use]
    pub fn kind(&self) -> HandlerKind {
        match self {
            Self::Sync(_) => HandlerKind::Sync,
            Self::Async(_) => HandlerKind::Async,
            Self::SyncWithModel(_) => HandlerKind::SyncWithModel,
            Self::AsyncWithModel(_) => HandlerKind::AsyncWithModel,
        }
    }
}

impl<TIn, TOut> Clone for Handler<TIn, TOut> {
    fn clone(&self) -> Self {
        match self {
            Self::Sync(f) => Self::Sync(Arc::clone(f)),
            Self::Async(f) => Self::Async(Arc::clone(f)),
            Self::SyncWithModel(f) => Self::SyncWithModel(Arc::clone(f)),
            Self::AsyncWithModel(f) => Self::AsyncWithModel(Arc::clone(f)),
        }
    }
}

impl<TIn, TOut> std::fmt::Debug for Handler<TIn, TOut> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Sync(_) => "Sync",
            Self::Async(_) => "Async",
            Self::SyncWithModel(_) => "SyncWithModel",
            Self::AsyncWithModel(_) => "AsyncWithModel",
        };
        f.debug_tuple("Handler").field(&kind).finish()
    }
}
