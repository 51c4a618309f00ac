//! splitd library - exposes the server for integration tests

pub mod error;
pub mod routes;
pub mod server;
