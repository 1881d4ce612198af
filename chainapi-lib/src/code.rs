//! Packaging of compiled contract code for the MicroPython VM.

pub const VM_TYPE_WASM: u8 = 0;
pub const VM_TYPE_MPY: u8 = 1;

const FROZEN_MODULE_VERSION: u32 = 5;
const HEADER_PADDING: usize = 60;
const MODULE_NAME: &[u8] = b"main.mpy\0";

/// Wraps compiled `.mpy` bytecode into the frozen module image that
/// `setcode` expects for [`VM_TYPE_MPY`] accounts.
///
/// Layout, integers little-endian `u32`:
/// `version | 60 zero bytes | name len | size table len | code len | name | size table | code`
pub fn package_mpy_module(code: &[u8]) -> Vec<u8> {
    let name_region = MODULE_NAME;
    let code_size_region = (code.len() as u32).to_le_bytes();

    let mut out = Vec::with_capacity(
        4 + HEADER_PADDING + 12 + name_region.len() + code_size_region.len() + code.len(),
    );
    out.extend_from_slice(&FROZEN_MODULE_VERSION.to_le_bytes());
    out.extend_from_slice(&[0u8; HEADER_PADDING]);
    out.extend_from_slice(&(name_region.len() as u32).to_le_bytes());
    out.extend_from_slice(&(code_size_region.len() as u32).to_le_bytes());
    out.extend_from_slice(&(code.len() as u32).to_le_bytes());
    out.extend_from_slice(name_region);
    out.extend_from_slice(&code_size_region);
    out.extend_from_slice(code);
    out
}
