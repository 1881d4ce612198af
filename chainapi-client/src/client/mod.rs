pub mod chain_api;
pub mod chain_cache;
pub mod deployer;
pub mod read;
pub mod tx_broadcast;
pub mod tx_builder;
