use crate::{error::AbiEncodingError, name::Name};

/// Append-only writer for the chain's binary format.
#[derive(Debug, Default, Clone)]
pub struct SerialBuffer {
    bytes: Vec<u8>,
}

impl SerialBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn push_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn push_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn push_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn push_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn push_varuint32(&mut self, mut value: u32) {
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value > 0 {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    pub fn push_len(&mut self, what: &'static str, len: usize) -> Result<(), AbiEncodingError> {
        let len32 = u32::try_from(len).map_err(|_| AbiEncodingError::LengthOverflow { what, len })?;
        self.push_varuint32(len32);
        Ok(())
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), AbiEncodingError> {
        self.push_len("bytes", bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    pub fn push_string(&mut self, value: &str) -> Result<(), AbiEncodingError> {
        self.push_len("string", value.len())?;
        self.bytes.extend_from_slice(value.as_bytes());
        Ok(())
    }

    pub fn push_name(&mut self, name: &Name) {
        self.push_u64(name.as_u64());
    }

    pub fn push_array<T>(
        &mut self,
        what: &'static str,
        items: &[T],
        mut push_item: impl FnMut(&mut Self, &T) -> Result<(), AbiEncodingError>,
    ) -> Result<(), AbiEncodingError> {
        self.push_len(what, items.len())?;
        for item in items {
            push_item(self, item)?;
        }
        Ok(())
    }
}
