//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned and propagated)
//!     → relay.rs (parse JSON, forward, map outcome to response)
//!     → Send to client
//! ```

pub mod relay;
pub mod request;
pub mod server;

pub use relay::RelayResponse;
pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
