#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("name `{0}` is longer than 13 characters")]
    TooLong(String),
    #[error("name `{name}` contains invalid character {invalid:?}")]
    InvalidCharacter { name: String, invalid: char },
    #[error("name `{0}` is not in canonical form")]
    NotCanonical(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("asset `{0}` must be `<amount> <symbol>`")]
    Malformed(String),
    #[error("invalid asset amount `{0}`")]
    InvalidAmount(String),
    #[error("invalid asset symbol `{0}`")]
    InvalidSymbol(String),
    #[error("precision {0} is out of range")]
    PrecisionOutOfRange(u8),
}

#[derive(Debug, thiserror::Error)]
pub enum AbiEncodingError {
    #[error("abi is not valid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("abi extension value is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("unsupported abi version `{0}`")]
    UnsupportedVersion(String),
    #[error("{what} length {len} does not fit in a varuint32")]
    LengthOverflow { what: &'static str, len: usize },
}
