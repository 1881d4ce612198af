use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AssetError;

pub const MAX_PRECISION: u8 = 18;

/// Token quantity such as `1.0000 EOS`, stored as an integer amount of the
/// smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    amount: i64,
    precision: u8,
    symbol: String,
}

impl Asset {
    pub fn new(amount: i64, precision: u8, symbol: &str) -> Result<Self, AssetError> {
        if precision > MAX_PRECISION {
            return Err(AssetError::PrecisionOutOfRange(precision));
        }
        validate_symbol(symbol)?;
        Ok(Self {
            amount,
            precision,
            symbol: symbol.to_string(),
        })
    }

    pub fn from_f64(value: f64, precision: u8, symbol: &str) -> Result<Self, AssetError> {
        if precision > MAX_PRECISION {
            return Err(AssetError::PrecisionOutOfRange(precision));
        }
        let scaled = (value * 10f64.powi(precision as i32)).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(AssetError::InvalidAmount(value.to_string()));
        }
        Self::new(scaled as i64, precision, symbol)
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn to_f64(&self) -> f64 {
        self.amount as f64 / 10f64.powi(self.precision as i32)
    }
}

fn validate_symbol(symbol: &str) -> Result<(), AssetError> {
    if symbol.is_empty() || symbol.len() > 7 || !symbol.bytes().all(|c| c.is_ascii_uppercase()) {
        return Err(AssetError::InvalidSymbol(symbol.to_string()));
    }
    Ok(())
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        if self.precision == 0 {
            return write!(f, "{sign}{abs} {}", self.symbol);
        }
        let unit = 10u64.pow(self.precision as u32);
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            abs / unit,
            abs % unit,
            self.symbol,
            width = self.precision as usize
        )
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(symbol), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AssetError::Malformed(s.to_string()));
        };
        let (digits, precision) = match amount.split_once('.') {
            Some((int, frac)) => (format!("{int}{frac}"), frac.len()),
            None => (amount.to_string(), 0),
        };
        let precision =
            u8::try_from(precision).map_err(|_| AssetError::InvalidAmount(amount.to_string()))?;
        if precision > MAX_PRECISION {
            return Err(AssetError::PrecisionOutOfRange(precision));
        }
        let amount = digits
            .parse::<i64>()
            .map_err(|_| AssetError::InvalidAmount(amount.to_string()))?;
        Self::new(amount, precision, symbol)
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
