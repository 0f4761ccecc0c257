use async_trait::async_trait;
use tracing::{debug, warn};

use triad_types::Content;

use crate::config::{join_mirror, GatewayConfig};
use crate::error::{GatewayError, GatewayResult};
use crate::traits::ContentGateway;

/// HTTP resolver that walks an ordered mirror list.
///
/// Each mirror gets one bounded-timeout request. The first mirror to
/// answer with a success status and a non-empty body wins; its body is
/// decoded as JSON with a raw-text fallback and no further mirrors are
/// tried. Mirror failures are logged and skipped — there is no per-mirror
/// retry and no backoff.
pub struct HttpGateway {
    client: reqwest::Client,
    mirrors: Vec<String>,
}

impl HttpGateway {
    /// Build a gateway from a config. Requires at least one mirror.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        if config.mirrors.is_empty() {
            return Err(GatewayError::NoMirrors);
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            mirrors: config.mirrors.clone(),
        })
    }

    /// Mirrors in fallback order.
    pub fn mirrors(&self) -> &[String] {
        &self.mirrors
    }
}

#[async_trait]
impl ContentGateway for HttpGateway {
    async fn fetch(&self, cid: &str) -> Option<Content> {
        for mirror in &self.mirrors {
            let url = join_mirror(mirror, cid);
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    match response.text().await {
                        Ok(body) if !body.trim().is_empty() => {
                            debug!(mirror = %mirror, cid, "mirror answered");
                            return Some(decode_body(body));
                        }
                        Ok(_) => {
                            debug!(mirror = %mirror, cid, "mirror returned empty body");
                        }
                        Err(error) => {
                            debug!(mirror = %mirror, cid, error = %error, "mirror body read failed");
                        }
                    }
                }
                Ok(response) => {
                    debug!(
                        mirror = %mirror,
                        cid,
                        status = %response.status(),
                        "mirror returned error status"
                    );
                }
                Err(error) => {
                    debug!(mirror = %mirror, cid, error = %error, "mirror request failed");
                }
            }
        }
        warn!(cid, "content unavailable on all mirrors");
        None
    }
}

/// Decode a response body: JSON if it parses, raw text otherwise.
fn decode_body(body: String) -> Content {
    match serde_json::from_str(&body) {
        Ok(value) => Content::Json(value),
        Err(_) => Content::Text(body),
    }
}
