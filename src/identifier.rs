use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::{Error, Result};

/// New-style arXiv identifiers (`YYMM.NNNN` / `YYMM.NNNNN`), optionally versioned.
pub static RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-2])([0-9])(0|1)([0-9])\.[0-9]{4,5}(v[0-9]{1,2})?").unwrap()
});
static VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"v[0-9]+$").unwrap());

pub const DEFAULT_VERSION: &str = "v1";

/// Returns the first arXiv identifier found anywhere in `input`, exactly as it appears there.
pub fn extract(input: &str) -> Result<&str> {
    RE.find(input)
        .map(|m| m.as_str())
        .ok_or_else(|| Error::InvalidInput(input.to_string()))
}

/// Reads the version tag (`v2`, `v13`, ...) off the end of a canonical identifier.
pub fn version(canonical_id: &str) -> String {
    match VERSION_RE.find(canonical_id.trim_end_matches('/')) {
        Some(m) => m.as_str().to_string(),
        None => {
            warn!("no version tag on {canonical_id:?}, assuming {DEFAULT_VERSION}");
            DEFAULT_VERSION.to_string()
        }
    }
}
