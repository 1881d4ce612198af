use base64::Engine;
use chainapi_lib::name::Name;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub server_version: String,
    pub chain_id: String,
    pub head_block_num: u64,
    pub last_irreversible_block_num: u64,
    pub last_irreversible_block_id: String,
    pub head_block_id: String,
    pub head_block_time: String,
    pub head_block_producer: String,
    #[serde(default)]
    pub server_version_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCodeAndAbi {
    pub account_name: Name,
    /// base64, empty when no contract is set
    pub wasm: String,
    /// base64, empty when no ABI is set
    pub abi: String,
}

impl RawCodeAndAbi {
    pub fn code(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        decode_non_empty(&self.wasm)
    }

    pub fn abi(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        decode_non_empty(&self.abi)
    }
}

fn decode_non_empty(field: &str) -> Result<Option<Vec<u8>>, base64::DecodeError> {
    if field.is_empty() {
        return Ok(None);
    }
    let bytes = base64::engine::general_purpose::STANDARD.decode(field)?;
    Ok((!bytes.is_empty()).then_some(bytes))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowsRequest {
    pub json: bool,
    pub code: Name,
    pub scope: String,
    pub table: Name,
    pub lower_bound: String,
    pub upper_bound: String,
    pub index_position: u32,
    pub key_type: String,
    pub limit: u32,
    pub reverse: bool,
    pub show_payer: bool,
}

impl TableRowsRequest {
    pub fn new(code: Name, scope: impl Into<String>, table: Name) -> Self {
        Self {
            json: true,
            code,
            scope: scope.into(),
            table,
            lower_bound: String::new(),
            upper_bound: String::new(),
            index_position: 1,
            key_type: String::new(),
            limit: 10,
            reverse: false,
            show_payer: false,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_bounds(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.lower_bound = lower.into();
        self.upper_bound = upper.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRows {
    pub rows: Vec<serde_json::Value>,
    #[serde(default)]
    pub more: bool,
    #[serde(default)]
    pub next_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducersRequest {
    pub json: bool,
    pub lower_bound: String,
    pub limit: u32,
}

impl Default for ProducersRequest {
    fn default() -> Self {
        Self {
            json: true,
            lower_bound: String::new(),
            limit: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producers {
    pub rows: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_producer_vote_weight: String,
    #[serde(default)]
    pub more: String,
}
