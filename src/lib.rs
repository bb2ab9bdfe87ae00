//! QR code HTTP service library.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /qr?url=..&size=..&level=..
//!     ──────────────────────────────────▶ http::server (request id, trace, timeout)
//!                                             │
//!                                             ▼
//!                                         routing (static table)
//!                                             │
//!                                             ▼
//!                                         http::handlers
//!                                             │  qr::params   (validate)
//!                                             │  qr::encoder  (PNG bytes)
//!                                             ▼
//!     ◀───────────────────────────────── 200 image/png | 400 text/plain
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod qr;
pub mod routing;

pub use config::ServiceConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
