//! QR code request handling subsystem.
//!
//! # Data Flow
//! ```text
//! query string pairs
//!     → params.rs (parse & validate into QrRequest)
//!     → encoder.rs (ImageEncoder capability → PNG bytes)
//! ```
//!
//! # Design Decisions
//! - A QrRequest only exists once every range/enum constraint holds
//! - The encoder is injected as a trait object so handlers can be tested
//!   against a fake

pub mod encoder;
pub mod params;

pub use encoder::{EncodeError, ImageEncoder, PngEncoder};
pub use params::{parse_int_with_default, query_pairs, QrRequest, RecoveryLevel};
