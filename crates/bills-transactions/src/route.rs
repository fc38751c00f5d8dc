//! HTTP endpoints for transactions.
//!
//! | Method | Pattern | Success |
//! |---|---|---|
//! | `POST` | `/transactions` | `204` |
//! | `GET` | `/transactions` | `200` with every transaction |
//! | `GET` | `/transactions/:id` | `200` with one transaction |

use crate::model::CreationRequest;
use crate::service::TransactionService;
use bills_core::{BillsError, BillsResult, BoxFuture, Context, ContextExt, Handler, Problem};
use bills_router::param_value;
use bills_server::Router;
use http::StatusCode;
use std::sync::Arc;

/// Collection pattern.
pub const COLLECTION: &str = "/transactions";

/// Item pattern.
pub const ITEM: &str = "/transactions/:id";

/// Transaction request handlers.
#[derive(Debug, Clone)]
pub struct TransactionRoutes {
    service: TransactionService,
}

impl TransactionRoutes {
    /// Creates the handlers over `service`.
    pub fn new(service: TransactionService) -> Self {
        Self { service }
    }

    /// Registers every endpoint on `router`.
    pub fn register(self, router: Router) -> Router {
        let routes = Arc::new(self);
        router
            .post(COLLECTION, Endpoint::new(&routes, Action::Create))
            .get(COLLECTION, Endpoint::new(&routes, Action::List))
            .get(ITEM, Endpoint::new(&routes, Action::Find))
    }

    /// `POST /transactions`.
    pub async fn create(&self, ctx: &mut dyn Context) -> BillsResult<()> {
        let request: CreationRequest = ctx.read_body()?;
        if let Err(error) = self.service.create(request) {
            ctx.logger().error(&error.to_string());
            return Err(BillsError::internal(error));
        }
        ctx.write_response(StatusCode::NO_CONTENT, &())
    }

    /// `GET /transactions`.
    pub async fn list(&self, ctx: &mut dyn Context) -> BillsResult<()> {
        let transactions = self.service.list().map_err(|error| {
            ctx.logger().error(&error.to_string());
            BillsError::internal(error)
        })?;
        ctx.write_response(StatusCode::OK, &transactions)
    }

    /// `GET /transactions/:id`.
    pub async fn find(&self, ctx: &mut dyn Context) -> BillsResult<()> {
        ctx.logger().debug("finding transaction");

        let raw = param_value(ITEM, ctx.path(), "id").unwrap_or_default();
        let id: u64 = raw
            .parse()
            .map_err(|_| Problem::bad_request(format!("Invalid transaction id `{raw}`")))?;

        let found = self.service.find(id).map_err(|error| {
            ctx.logger().error(&error.to_string());
            BillsError::internal(error)
        })?;

        match found {
            Some(transaction) => ctx.write_response(StatusCode::OK, &transaction),
            None => Err(Problem {
                message: format!("Transaction {id} does not exist"),
                ..Problem::not_found(ctx.path())
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Create,
    List,
    Find,
}

struct Endpoint {
    routes: Arc<TransactionRoutes>,
    action: Action,
}

impl Endpoint {
    fn new(routes: &Arc<TransactionRoutes>, action: Action) -> Self {
        Self {
            routes: Arc::clone(routes),
            action,
        }
    }
}

impl Handler for Endpoint {
    fn call<'a>(&'a self, ctx: &'a mut dyn Context) -> BoxFuture<'a, BillsResult<()>> {
        Box::pin(async move {
            match self.action {
                Action::Create => self.routes.create(ctx).await,
                Action::List => self.routes.list(ctx).await,
                Action::Find => self.routes.find(ctx).await,
            }
        })
    }
}
