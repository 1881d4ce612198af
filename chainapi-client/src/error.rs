use std::time::Duration;

use chainapi_lib::error::{AbiEncodingError, AssetError};

/// Structured error returned by the transaction submitter, kept verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", pretty_json(.error))]
pub struct ChainError {
    pub error: serde_json::Value,
}

impl ChainError {
    pub fn new(error: serde_json::Value) -> Self {
        Self { error }
    }

    pub fn message(&self) -> Option<&str> {
        self.error
            .get("message")
            .or_else(|| self.error.get("what"))
            .and_then(|m| m.as_str())
    }
}

fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ChainApiError {
    #[error("abi encoding failed: {0}")]
    Encoding(#[from] AbiEncodingError),
    #[error("transaction failed: {0}")]
    Chain(#[from] ChainError),
    #[error("node rpc `{endpoint}` returned an error: {}", pretty_json(.body))]
    Rpc {
        endpoint: String,
        body: serde_json::Value,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected node response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid base64 in node response: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid asset: {0}")]
    Asset(#[from] AssetError),
    #[error("transaction submission timed out after {0:?}")]
    Timeout(Duration),
}

impl ChainApiError {
    /// The structured payload of a chain or node error, if any.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            ChainApiError::Chain(err) => Some(&err.error),
            ChainApiError::Rpc { body, .. } => Some(body),
            _ => None,
        }
    }
}
