use chainapi_client::{client::chain_api::ChainApi, config::ChainConfig};
use chainapi_lib::{
    abi::{AbiInput, BinaryAbiEncoder},
    name,
    name::Name,
};
use hex_literal::hex;
use serde_json::{json, Value};

use crate::fixture::in_memory_chain::InMemoryChain;

pub const ALICE: Name = Name::from_static("alice");

/// `\0asm` header followed by version 1.
pub const HELLO_CODE: [u8; 8] = hex!("0061736d01000000");

pub struct ChainFixture {
    chain: InMemoryChain,
    api: ChainApi<InMemoryChain, InMemoryChain>,
}

impl ChainFixture {
    pub fn new() -> Self {
        let chain = InMemoryChain::new();
        chain.create_account(name!("eosio"));
        chain.create_account(ALICE);
        let api = ChainApi::new(ChainConfig::dev(), chain.clone(), chain.clone());
        ChainFixture { chain, api }
    }

    pub fn chain(&self) -> &InMemoryChain {
        &self.chain
    }

    pub fn api(&self) -> &ChainApi<InMemoryChain, InMemoryChain> {
        &self.api
    }

    pub fn hello_abi() -> Value {
        json!({
            "version": "eosio::abi/1.1",
            "structs": [{
                "name": "sayhello",
                "base": "",
                "fields": [{"name": "name", "type": "string"}]
            }],
            "actions": [{"name": "sayhello", "type": "sayhello", "ricardian_contract": ""}],
        })
    }

    pub fn hello_abi_bytes() -> Vec<u8> {
        AbiInput::from(Self::hello_abi())
            .normalize(&BinaryAbiEncoder)
            .unwrap()
    }
}
