use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http client construction failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("no mirrors configured")]
    NoMirrors,
}

pub type GatewayResult<T> = Result<T, GatewayError>;
