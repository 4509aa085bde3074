//! HTTP front end for campana.
//!
//! Serves the registered collections as JSON over two read-only endpoints:
//!
//! - `GET /campana?campana_id=...`
//! - `GET /estacion?campana_id=...`
//!
//! plus `GET /health`. The binary in `main.rs` wires configuration, logging and the
//! MongoDB backend; everything else lives here so tests can assemble the same
//! application around an in-memory backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;
