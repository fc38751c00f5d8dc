//! # Bills Transactions
//!
//! Transaction bookkeeping on top of the Bills framework.
//!
//! - [`Transaction`] - The stored entity
//! - [`CreationRequest`] - Validated payload of `POST /transactions`
//! - [`storage`] - Persistence seam and the in-memory backend
//! - [`TransactionService`] - Use cases over a storage
//! - [`TransactionRoutes`] - HTTP handlers
//! - [`ModuleBuilder`] - Assembly of the pieces above
//! - [`build_server`] - Middleware and routes on a [`bills_server::RestServer`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod entity;
mod model;
mod module;
mod route;
mod service;
pub mod storage;

pub use app::build_server;
pub use entity::Transaction;
pub use model::CreationRequest;
pub use module::{ModuleBuilder, ModuleError, ModuleProvider};
pub use route::{TransactionRoutes, COLLECTION, ITEM};
pub use service::TransactionService;
