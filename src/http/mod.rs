//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign X-Request-ID)
//!     → routing table (path → handler)
//!     → handlers.rs (validate, encode, respond)
//!     → error.rs (400 for every client-visible failure)
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::RequestError;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
