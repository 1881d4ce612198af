use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NameError;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";
const MAX_NAME_LEN: usize = 13;

/// Account, action, permission and table names, packed base32 into a `u64`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(u64);

impl Name {
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Compile time counterpart of `FromStr` for constants. Panics on
    /// characters outside `.1-5a-z` or names longer than 13 characters.
    pub const fn from_static(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() <= MAX_NAME_LEN, "name too long");
        let mut value = 0u64;
        let mut i = 0;
        while i < bytes.len() {
            let symbol = match bytes[i] {
                c @ b'a'..=b'z' => (c - b'a') as u64 + 6,
                c @ b'1'..=b'5' => (c - b'1') as u64 + 1,
                b'.' => 0,
                _ => panic!("invalid name character"),
            };
            if i < 12 {
                value |= symbol << (64 - 5 * (i + 1));
            } else {
                assert!(symbol <= 0x0f, "invalid 13th name character");
                value |= symbol;
            }
            i += 1;
        }
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_NAME_LEN {
            return Err(NameError::TooLong(s.to_string()));
        }
        let mut value = 0u64;
        for (i, c) in s.bytes().enumerate() {
            let symbol = char_to_symbol(c).ok_or_else(|| NameError::InvalidCharacter {
                name: s.to_string(),
                invalid: c as char,
            })?;
            if i < 12 {
                value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
            } else {
                // the 13th character only has 4 bits left
                if symbol > 0x0f {
                    return Err(NameError::InvalidCharacter {
                        name: s.to_string(),
                        invalid: c as char,
                    });
                }
                value |= symbol;
            }
        }
        let name = Name(value);
        if name.to_string() != s {
            return Err(NameError::NotCanonical(s.to_string()));
        }
        Ok(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[12 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }
        let len = out.iter().rposition(|c| *c != b'.').map_or(0, |i| i + 1);
        // every byte comes from CHARMAP
        f.write_str(std::str::from_utf8(&out[..len]).map_err(|_| fmt::Error)?)
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Shorthand for names known to be valid at compile time, panics otherwise.
#[macro_export]
macro_rules! name {
    ($s:expr) => {
        <$crate::name::Name as ::std::str::FromStr>::from_str($s).expect("invalid name literal")
    };
}
