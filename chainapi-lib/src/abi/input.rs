use crate::{
    abi::{AbiDef, AbiEncoder},
    error::AbiEncodingError,
};

/// The forms a caller can hand an ABI in.
#[derive(Debug, Clone, PartialEq)]
pub enum AbiInput {
    /// Typed definition, encoded without another parse.
    Typed(AbiDef),
    /// Already parsed JSON object.
    Structured(serde_json::Value),
    /// JSON text.
    Json(String),
    /// Raw encoded ABI, used as is.
    Raw(Vec<u8>),
}

impl AbiInput {
    /// Converts any input form to raw ABI bytes. Typed, structured and JSON
    /// inputs go through `encoder` exactly once, raw input never does.
    pub fn normalize(&self, encoder: &impl AbiEncoder) -> Result<Vec<u8>, AbiEncodingError> {
        match self {
            AbiInput::Typed(abi) => encoder.encode_abi(abi),
            AbiInput::Structured(value) => encoder.encode_abi(&AbiDef::from_value(value.clone())?),
            AbiInput::Json(text) => encoder.encode_abi(&AbiDef::from_json(text)?),
            AbiInput::Raw(bytes) => Ok(bytes.clone()),
        }
    }
}

impl From<AbiDef> for AbiInput {
    fn from(abi: AbiDef) -> Self {
        AbiInput::Typed(abi)
    }
}

impl From<serde_json::Value> for AbiInput {
    fn from(value: serde_json::Value) -> Self {
        AbiInput::Structured(value)
    }
}

impl From<String> for AbiInput {
    fn from(text: String) -> Self {
        AbiInput::Json(text)
    }
}

impl From<&str> for AbiInput {
    fn from(text: &str) -> Self {
        AbiInput::Json(text.to_string())
    }
}

impl From<Vec<u8>> for AbiInput {
    fn from(bytes: Vec<u8>) -> Self {
        AbiInput::Raw(bytes)
    }
}
