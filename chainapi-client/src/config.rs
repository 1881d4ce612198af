use std::time::Duration;

use anyhow::Context;
use chainapi_lib::name::Name;

use crate::rpc::NodeRpcClient;

pub const LOCAL_NODE_URL: &str = "http://127.0.0.1:8888";
pub const SYSTEM_CONTRACT: Name = Name::from_static("eosio");
pub const MAIN_TOKEN: &str = "EOS";
pub const MAIN_TOKEN_CONTRACT: Name = Name::from_static("eosio.token");
pub const TOKEN_PRECISION: u8 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub node_url: String,
    pub system_contract: Name,
    pub main_token: String,
    pub main_token_contract: Name,
    pub token_precision: u8,
    /// Upper bound on a single transaction submission. `None` waits forever.
    pub submit_timeout: Option<Duration>,
}

impl ChainConfig {
    /// Dev values, overridden by any `CHAINAPI_*` variable that is set.
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load_with(env_var)
    }

    /// Same as [`Self::load_from_env`] with `lookup` in place of the process
    /// environment. Empty values count as unset.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::dev();
        if let Some(url) = var("CHAINAPI_NODE_URL") {
            config.node_url = url;
        }
        if let Some(contract) = var("CHAINAPI_SYSTEM_CONTRACT") {
            config.system_contract = contract
                .parse()
                .context("CHAINAPI_SYSTEM_CONTRACT is not a valid name")?;
        }
        if let Some(token) = var("CHAINAPI_MAIN_TOKEN") {
            config.main_token = token;
        }
        if let Some(contract) = var("CHAINAPI_MAIN_TOKEN_CONTRACT") {
            config.main_token_contract = contract
                .parse()
                .context("CHAINAPI_MAIN_TOKEN_CONTRACT is not a valid name")?;
        }
        if let Some(precision) = var("CHAINAPI_TOKEN_PRECISION") {
            config.token_precision = precision
                .parse()
                .context("CHAINAPI_TOKEN_PRECISION must be a small integer")?;
        }
        if let Some(secs) = var("CHAINAPI_SUBMIT_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("CHAINAPI_SUBMIT_TIMEOUT_SECS must be a number of seconds")?;
            config.submit_timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn dev() -> Self {
        Self {
            node_url: LOCAL_NODE_URL.to_string(),
            system_contract: SYSTEM_CONTRACT,
            main_token: MAIN_TOKEN.to_string(),
            main_token_contract: MAIN_TOKEN_CONTRACT,
            token_precision: TOKEN_PRECISION,
            submit_timeout: None,
        }
    }

    pub fn with_node_url(mut self, node_url: impl Into<String>) -> Self {
        self.node_url = node_url.into();
        self
    }

    pub fn node_rpc_client(&self) -> NodeRpcClient {
        NodeRpcClient::new(&self.node_url)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
