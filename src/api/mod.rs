//! HTTP API.
//!
//! JSON CRUD over the [`Storage`](crate::storage::Storage) contract, nested
//! under `/api/`. Handlers are thin: parse, validate, call the store,
//! enrich lab orders with their related records.
//!
//! The router is composable: `api_router()` returns a `Router` that can be
//! mounted on any axum server instance; `start_api_server()` runs one.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::ApiContext;
