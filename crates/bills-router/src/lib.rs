//! Route matching for Bills.
//!
//! Routes are plain `/`-separated patterns. A segment starting with `:` is a
//! parameter and matches any single segment; all other segments match
//! literally. The table is scanned linearly, so it suits the small route sets
//! of a service rather than large generated APIs.
//!
//! # Example
//!
//! ```rust
//! use bills_router::{RouteStatus, RouteTable};
//! use http::Method;
//!
//! let table = RouteTable::new()
//!     .get("/transactions/:id", "find")
//!     .post("/transactions", "create");
//!
//! let found = table.resolve("/transactions/17", &Method::GET);
//! assert_eq!(found.handler(), Some(&"find"));
//!
//! let wrong_method = table.resolve("/transactions", &Method::GET);
//! assert_eq!(wrong_method.status(), RouteStatus::MethodNotAllowed);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod matcher;
mod method_router;
mod table;

pub use matcher::{matches, param_value, split_path};
pub use method_router::MethodRouter;
pub use table::{Resolution, RouteStatus, RouteTable};
