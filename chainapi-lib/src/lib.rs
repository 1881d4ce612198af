pub mod abi;
pub mod action;
pub mod asset;
pub mod code;
pub mod error;
pub mod name;
pub mod serialize;
