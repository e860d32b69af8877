//! HTTP API server: configuration, shared state, error mapping, and the
//! route tree over the execution pipeline and the record store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
