//! The request dispatcher.
//!
//! [`RestServer`] owns the route table (handlers already wrapped by the
//! middleware pipeline) and the [`ContextPool`]. [`RestServer::handle`] turns
//! one collected request into one response and never fails: routing misses,
//! handler errors and panics all become problem responses.
//!
//! # Example
//!
//! ```rust
//! use bills_core::{handler_fn, ContextExt};
//! use bills_server::{RestServer, Router};
//! use bytes::Bytes;
//! use http::{Request, StatusCode};
//!
//! # tokio_test::block_on(async {
//! let router = Router::new().get(
//!     "/ping",
//!     handler_fn(|ctx| Box::pin(async move { ctx.write_response(StatusCode::OK, &"pong") })),
//! );
//! let server = RestServer::builder().router(router).build();
//!
//! let request = Request::get("/ping").body(Bytes::new()).unwrap();
//! let response = server.handle(request).await;
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.body().as_ref(), b"\"pong\"");
//! # });
//! ```

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::pool::ContextPool;
use crate::shutdown::ShutdownSignal;
use bills_core::{
    BillsError, BillsResult, Binder, BoxFuture, BoxedHandler, Context, ContextExt, Handler,
    Logger, Problem, Validator,
};
use bills_middleware::{Middleware, Pipeline};
use bills_router::{Resolution, RouteTable};
use bytes::Bytes;
use futures_util::FutureExt;
use http::{Method, Request, Response};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Route registrations collected before the server is built.
#[derive(Default)]
pub struct Router {
    table: RouteTable<BoxedHandler>,
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` on `pattern`, replacing any previous one.
    pub fn route<H: Handler>(mut self, method: Method, pattern: impl Into<String>, handler: H) -> Self {
        self.table.register(pattern, method, Arc::new(handler));
        self
    }

    /// Registers a `GET` handler.
    pub fn get<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::GET, pattern, handler)
    }

    /// Registers a `POST` handler.
    pub fn post<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::POST, pattern, handler)
    }

    /// Registers a `PUT` handler.
    pub fn put<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::PUT, pattern, handler)
    }

    /// Registers a `PATCH` handler.
    pub fn patch<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::PATCH, pattern, handler)
    }

    /// Registers a `DELETE` handler.
    pub fn delete<H: Handler>(self, pattern: impl Into<String>, handler: H) -> Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.table.routes()).finish()
    }
}

/// Builder for [`RestServer`].
#[derive(Debug, Default)]
pub struct RestServerBuilder {
    config: ServerConfig,
    router: Router,
    pipeline: Pipeline,
    logger: Option<Logger>,
    validator: Option<Arc<Validator>>,
}

impl RestServerBuilder {
    /// Sets the server configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the routes.
    pub fn router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    /// Appends a middleware; the first one added is the outermost.
    pub fn use_middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.pipeline.push(Arc::new(middleware));
        self
    }

    /// Replaces the whole pipeline.
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Sets the logger handed to every context.
    ///
    /// Defaults to one tagged with the configured service name.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Shares an existing validator with the server's binder.
    pub fn validator(mut self, validator: Arc<Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Composes every route with the pipeline and builds the server.
    pub fn build(self) -> RestServer {
        let Self {
            config,
            router,
            pipeline,
            logger,
            validator,
        } = self;

        let logger = logger.unwrap_or_else(|| Logger::new(config.service_name()));
        let binder = Arc::new(Binder::new(validator.unwrap_or_default()));
        let routes = router.table.map_handlers(|handler| pipeline.apply(handler));
        let pool = ContextPool::new(config.pool_capacity(), logger, binder);

        tracing::debug!(
            routes = routes.len(),
            middleware = ?pipeline.names(),
            "server built"
        );

        RestServer {
            routes,
            pool,
            config,
        }
    }
}

/// The dispatcher.
pub struct RestServer {
    routes: RouteTable<BoxedHandler>,
    pool: ContextPool,
    config: ServerConfig,
}

impl RestServer {
    /// Starts building a server.
    #[must_use]
    pub fn builder() -> RestServerBuilder {
        RestServerBuilder::default()
    }

    /// The server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The context pool.
    pub fn pool(&self) -> &ContextPool {
        &self.pool
    }

    /// Registered `(pattern, method)` pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &Method)> {
        self.routes.routes()
    }

    /// Dispatches one request.
    pub async fn handle(&self, request: Request<Bytes>) -> Response<Bytes> {
        let rejection;
        let handler: &dyn Handler = match self.routes.resolve(request.uri().path(), request.method()) {
            Resolution::Matched(handler) => &**handler,
            Resolution::PathNotFound => {
                rejection = Reject(Problem::not_found(request.uri().path()));
                &rejection
            }
            Resolution::MethodNotAllowed => {
                rejection = Reject(Problem::method_not_allowed(
                    request.uri().path(),
                    request.method(),
                ));
                &rejection
            }
        };

        let mut ctx = self.pool.acquire(request);
        let outcome = AssertUnwindSafe(handler.call(&mut *ctx)).catch_unwind().await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                if let BillsError::Internal(source) = &error {
                    tracing::error!(
                        http.method = %ctx.method(),
                        http.target = %ctx.uri(),
                        error = %source,
                        "handler failed"
                    );
                }
                ctx.write_problem(&error.into_problem());
            }
            Err(panic) => {
                tracing::error!(
                    http.method = %ctx.method(),
                    http.target = %ctx.uri(),
                    panic = panic_message(panic.as_ref()),
                    "handler panicked"
                );
                ctx.write_problem(&Problem::internal_server_error());
            }
        }

        ctx.take_response()
    }

    /// Binds the configured address and serves until `shutdown` fires.
    pub async fn start(self: Arc<Self>, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        self.config.validate()?;
        let address = self.config.bind_address().to_owned();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })?;
        crate::transport::serve(self, listener, shutdown).await
    }
}

impl std::fmt::Debug for RestServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestServer")
            .field("routes", &self.routes.len())
            .field("pool", &self.pool)
            .field("config", &self.config)
            .finish()
    }
}

/// Stands in for a handler when routing fails. Never wrapped by middleware.
struct Reject(Problem);

impl Handler for Reject {
    fn call<'a>(&'a self, _ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> {
        let problem = self.0.clone();
        Box::pin(async move { Err(problem.into()) })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
