//! Route Modules
//!
//! A route module groups routes under a base path. Its registration helpers
//! wrap each handler with binding, validation and error translation before
//! handing the resulting callback to the router.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put, MethodRouter};
use axum::Router;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use validator::Validate;

use crate::application::route_handlers::{run_handler, Handler};
use crate::domain::gateways::{ModelBinder, RouteRegistrar};
use crate::domain::models::route::{RouteRegistration, Verb};
use crate::infrastructure::driving_adapters::api_rest::binding::RequestBinder;
use crate::infrastructure::driving_adapters::api_rest::negotiation::Negotiate;
use crate::shared::errors::{ApiError, RouteError};

/// Type-erased callback the router invokes for a matched route
pub type RouteCallback = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// A set of routes sharing a base path and a model binder
pub struct RouteModule<B = RequestBinder> {
    base_path: String,
    binder: Arc<B>,
    routes: Vec<(RouteRegistration, RouteCallback)>,
}

impl RouteModule<RequestBinder> {
    /// Create a module under `base_path` using the default request binder
    pub fn new(base_path: impl Into<String>) -> Self {
        Self::with_binder(base_path, RequestBinder::default())
    }
}

impl<B> RouteModule<B>
where
    B: ModelBinder<Request<Body>> + 'static,
{
    /// Create a module under `base_path` with a custom binder
    pub fn with_binder(base_path: impl Into<String>, binder: B) -> Self {
        Self {
            base_path: base_path.into(),
            binder: Arc::new(binder),
            routes: Vec::new(),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Register a GET route named after its path
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn get<TIn, TOut>(&mut self, path: &str, handler: Handler<TIn, TOut>) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Get, path, path, handler)
    }

    /// Register a named GET route
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn get_named<TIn, TOut>(
        &mut self,
        name: &str,
        path: &str,
        handler: Handler<TIn, TOut>,
    ) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Get, name, path, handler)
    }

    /// Register a POST route named after its path
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn post<TIn, TOut>(&mut self, path: &str, handler: Handler<TIn, TOut>) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Post, path, path, handler)
    }

    /// Register a named POST route
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn post_named<TIn, TOut>(
        &mut self,
        name: &str,
        path: &str,
        handler: Handler<TIn, TOut>,
    ) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Post, name, path, handler)
    }

    /// Register a PUT route named after its path
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn put<TIn, TOut>(&mut self, path: &str, handler: Handler<TIn, TOut>) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Put, path, path, handler)
    }

    /// Register a named PUT route
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn put_named<TIn, TOut>(
        &mut self,
        name: &str,
        path: &str,
        handler: Handler<TIn, TOut>,
    ) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Put, name, path, handler)
    }

    /// Register a PATCH route named after its path
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn patch<TIn, TOut>(&mut self, path: &str, handler: Handler<TIn, TOut>) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Patch, path, path, handler)
    }

    /// Register a named PATCH route
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn patch_named<TIn, TOut>(
        &mut self,
        name: &str,
        path: &str,
        handler: Handler<TIn, TOut>,
    ) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Patch, name, path, handler)
    }

    /// Register a DELETE route named after its path
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn delete<TIn, TOut>(&mut self, path: &str, handler: Handler<TIn, TOut>) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Delete, path, path, handler)
    }

    /// Register a named DELETE route
    ///
    /// # Errors
    ///
    /// See [`RouteModule::route`].
    pub fn delete_named<TIn, TOut>(
        &mut self,
        name: &str,
        path: &str,
        handler: Handler<TIn, TOut>,
    ) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        self.route(Verb::Delete, name, path, handler)
    }

    /// Wrap `handler` and register it for `verb` at `path` under the base path
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidPath` if `path` does not start with `/`,
    /// `RouteError::Duplicate` if the verb and path are already taken, and
    /// `RouteError::Conflict` if the router could not tell the path apart
    /// from a registered one.
    pub fn route<TIn, TOut>(
        &mut self,
        verb: Verb,
        name: &str,
        path: &str,
        handler: Handler<TIn, TOut>,
    ) -> Result<&mut Self, RouteError>
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        let route = RouteRegistration::new(verb, path, name, handler.kind().requires_model())?.under(&self.base_path);
        let callback = self.adapt(&route, handler);
        self.register(route, callback)?;
        Ok(self)
    }

    /// Take over every route of `other`, keeping their full paths
    ///
    /// # Errors
    ///
    /// Returns `RouteError::Duplicate` if `other` registers a verb and path
    /// this module already has, or `RouteError::Conflict` if one of its paths
    /// clashes with a registered one.
    pub fn mount<B2>(&mut self, other: RouteModule<B2>) -> Result<&mut Self, RouteError> {
        for (route, callback) in other.routes {
            self.register(route, callback)?;
        }
        Ok(self)
    }

    /// Build the axum router serving every registered route
    pub fn into_router(self) -> Router {
        self.routes
            .into_iter()
            .fold(Router::new(), |router, (route, callback)| {
                router.route(route.path(), method_router(route.verb(), callback))
            })
    }

    /// Produce the route callback running `handler` through the adapter
    fn adapt<TIn, TOut>(&self, route: &RouteRegistration, handler: Handler<TIn, TOut>) -> RouteCallback
    where
        TIn: DeserializeOwned + Validate + Send + 'static,
        TOut: IntoResponse + Send + 'static,
    {
        let binder = Arc::clone(&self.binder);
        let name = route.name().to_string();
        let verb = route.verb();

        Arc::new(move |request: Request<Body>| {
            let handler = handler.clone();
            let binder = Arc::clone(&binder);
            let span = tracing::debug_span!("route", name = %name, verb = %verb);

            async move {
                let negotiate = Negotiate::from_request(&request);
                let outcome = AssertUnwindSafe(run_handler(&handler, || binder.bind_and_validate(request)))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        let error = ApiError::from_panic(&*panic);
                        tracing::error!(error = %error, "Handler panicked");
                        Err(error)
                    });
                negotiate.respond(outcome)
            }
            .instrument(span)
            .boxed()
        })
    }
}

impl<B> RouteRegistrar for RouteModule<B> {
    type Callback = RouteCallback;

    fn register(&mut self, route: RouteRegistration, callback: RouteCallback) -> Result<(), RouteError> {
        let taken = self
            .routes
            .iter()
            .any(|(existing, _)| existing.verb() == route.verb() && existing.path() == route.path());
        if taken {
            return Err(RouteError::Duplicate {
                verb: route.verb(),
                path: route.path().to_string(),
            });
        }
        if let Some((existing, _)) = self.routes.iter().find(|(existing, _)| existing.conflicts_with(&route)) {
            return Err(RouteError::Conflict {
                path: route.path().to_string(),
                existing: existing.path().to_string(),
            });
        }

        tracing::debug!(name = %route.name(), verb = %route.verb(), path = %route.path(), "Route registered");
        self.routes.push((route, callback));
        Ok(())
    }

    fn routes(&self) -> Vec<RouteRegistration> {
        self.routes.iter().map(|(route, _)| route.clone()).collect()
    }
}

fn method_router(verb: Verb, callback: RouteCallback) -> MethodRouter {
    let handler = move |request: Request<Body>| callback(request);
    match verb {
        Verb::Get => get(handler),
        Verb::Post => post(handler),
        Verb::Put => put(handler),
        Verb::Patch => patch(handler),
        Verb::Delete => delete(handler),
    }
}
