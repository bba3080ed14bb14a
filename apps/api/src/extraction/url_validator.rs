//! URL validation for inbound analysis requests.

use url::Url;

/// True when `candidate` parses as an absolute URL with an `http` or `https` scheme.
/// Malformed input yields `false`; this never errors.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
