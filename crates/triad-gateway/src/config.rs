use std::time::Duration;

/// Public mirror endpoints tried in order when none are configured.
pub const DEFAULT_MIRRORS: [&str; 4] = [
    "https://ipfs.io/ipfs/",
    "https://gateway.pinata.cloud/ipfs/",
    "https://dweb.link/ipfs/",
    "https://cloudflare-ipfs.com/ipfs/",
];

/// Per-request timeout applied to every mirror attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Mirror list and request timeout for an [`HttpGateway`].
///
/// The mirror order is significant: it is the fallback order, and the
/// first mirror is also the base used when rendering entity URLs.
///
/// [`HttpGateway`]: crate::http::HttpGateway
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Ordered mirror base URLs.
    pub mirrors: Vec<String>,
    /// Fixed timeout for each individual request.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Canonical URL for a CID, built from the primary mirror.
    pub fn primary_url(&self, cid: &str) -> String {
        let base = self
            .mirrors
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_MIRRORS[0]);
        join_mirror(base, cid)
    }
}

/// Join a mirror base URL and a CID into a request URL.
pub fn join_mirror(base: &str, cid: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{cid}")
    } else {
        format!("{base}/{cid}")
    }
}

/// Recover the CID from an entity URL.
///
/// Splits on the last `/ipfs/` segment; a URL without one is returned
/// unchanged so a malformed location degrades to a failed fetch rather
/// than a panic.
pub fn extract_cid(url: &str) -> &str {
    url.rsplit_once("/ipfs/").map_or(url, |(_, cid)| cid)
}
