//! Query parameter parsing.
//!
//! Every function here is a pure function of its input.

use std::fmt;

use percent_encoding::percent_decode_str;

use crate::http::error::RequestError;

/// Smallest accepted image size in pixels.
pub const MIN_SIZE: u32 = 128;
/// Largest accepted image size in pixels.
pub const MAX_SIZE: u32 = 1024;
/// Image size used when the `size` parameter is absent or empty.
pub const DEFAULT_SIZE: i64 = 256;

/// Parse a base-10 integer, falling back to `default` for an empty string.
pub fn parse_int_with_default(raw: &str, default: i64) -> Result<i64, RequestError> {
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse::<i64>()
        .map_err(|_| RequestError::BadRequest("parameter must be an integer"))
}

/// QR error-correction level, trading payload capacity for resilience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecoveryLevel {
    /// Recovers roughly 7% of the symbol.
    Low,
    /// Recovers roughly 15% of the symbol.
    #[default]
    Medium,
    /// Recovers roughly 25% of the symbol.
    High,
    /// Recovers roughly 30% of the symbol.
    Max,
}

impl RecoveryLevel {
    /// Parse the single-letter level code. Empty means the default.
    pub fn parse(code: &str) -> Result<Self, RequestError> {
        match code {
            "l" => Ok(Self::Low),
            "m" | "" => Ok(Self::Medium),
            "h" => Ok(Self::High),
            "x" => Ok(Self::Max),
            _ => Err(RequestError::BadRequest(
                "level parameter must be one of l,m,h,x",
            )),
        }
    }

    /// The letter accepted by [`RecoveryLevel::parse`].
    pub fn code(self) -> &'static str {
        match self {
            Self::Low => "l",
            Self::Medium => "m",
            Self::High => "h",
            Self::Max => "x",
        }
    }
}

impl fmt::Display for RecoveryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated `/qr` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    /// Bytes encoded into the symbol, exactly as the client sent them.
    pub url: Vec<u8>,
    /// Width and height of the output image in pixels.
    pub size: u32,
    /// Error-correction level.
    pub level: RecoveryLevel,
}

impl QrRequest {
    /// Build a request from the raw (still percent-encoded) query string.
    ///
    /// Checks run in the order url, level, size and the first failure is
    /// returned. When a key repeats, its first value wins.
    pub fn from_query(raw: Option<&str>) -> Result<Self, RequestError> {
        let pairs = query_pairs(raw.unwrap_or(""));

        let url = first_value(&pairs, b"url");
        if url.is_empty() {
            return Err(RequestError::BadRequest("URL query parameter required"));
        }

        let level = std::str::from_utf8(first_value(&pairs, b"level"))
            .map_err(|_| RequestError::BadRequest("level parameter must be one of l,m,h,x"))
            .and_then(RecoveryLevel::parse)?;

        let size = std::str::from_utf8(first_value(&pairs, b"size"))
            .map_err(|_| RequestError::BadRequest("parameter must be an integer"))
            .and_then(|raw| parse_int_with_default(raw, DEFAULT_SIZE))?;
        let size = u32::try_from(size)
            .ok()
            .filter(|s| (MIN_SIZE..=MAX_SIZE).contains(s))
            .ok_or(RequestError::BadRequest(
                "parameter must be between 128 and 1024",
            ))?;

        Ok(Self {
            url: url.to_vec(),
            size,
            level,
        })
    }
}

/// Split an `application/x-www-form-urlencoded` query into decoded byte pairs.
///
/// `+` decodes to a space. Decoding never fails: malformed escapes are kept
/// literally and the result need not be UTF-8.
pub fn query_pairs(raw: &str) -> Vec<(Vec<u8>, Vec<u8>)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(key), form_decode(value))
        })
        .collect()
}

fn form_decode(component: &str) -> Vec<u8> {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).collect()
}

/// First value bound to `name`, or the empty slice.
fn first_value<'a>(pairs: &'a [(Vec<u8>, Vec<u8>)], name: &[u8]) -> &'a [u8] {
    pairs
        .iter()
        .find(|(key, _)| key.as_slice() == name)
        .map_or(&[][..], |(_, value)| value.as_slice())
}
