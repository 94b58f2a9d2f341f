//! # Server Components
//!
//! ## Core Service ([`server`])
//! Runs the codec for one request on the blocking thread pool.
//!
//! ## HTTP API ([`api`])
//! axum router, multipart parsing and error mapping.

pub mod api;
pub mod server;

pub use api::{router, AppState};
pub use server::StegoService;
