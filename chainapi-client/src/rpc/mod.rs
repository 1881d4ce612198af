pub mod types;

use chainapi_lib::name::Name;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use crate::{
    client::read::{AccountChainState, NodeReader},
    error::ChainApiError,
};

use self::types::*;

/// HTTP client for the node's `/v1/chain/*` endpoints.
#[derive(Debug, Clone)]
pub struct NodeRpcClient {
    http: reqwest::Client,
    node_url: String,
}

impl NodeRpcClient {
    pub fn new(node_url: &str) -> Self {
        Self::with_http_client(reqwest::Client::new(), node_url)
    }

    pub fn with_http_client(http: reqwest::Client, node_url: &str) -> Self {
        Self {
            http,
            node_url: node_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    pub fn set_node(&mut self, node_url: &str) {
        self.node_url = node_url.trim_end_matches('/').to_string();
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/v1/chain/{}", self.node_url, endpoint)
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ChainApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", endpoint);
        let response = self
            .http
            .post(self.endpoint_url(endpoint))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let value: serde_json::Value = response.json().await?;
        if !status.is_success() || value.get("error").is_some() {
            return Err(ChainApiError::Rpc {
                endpoint: endpoint.to_string(),
                body: value,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_info(&self) -> Result<ChainInfo, ChainApiError> {
        self.post("get_info", &json!({})).await
    }

    pub async fn get_chain_id(&self) -> Result<String, ChainApiError> {
        Ok(self.get_info().await?.chain_id)
    }

    /// `None` when the node reports the account as unknown.
    pub async fn get_account(
        &self,
        account: Name,
    ) -> Result<Option<serde_json::Value>, ChainApiError> {
        match self
            .post("get_account", &json!({ "account_name": account }))
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(ChainApiError::Rpc { body, .. }) => {
                tracing::debug!("get_account {} failed: {}", account, body);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get_raw_code_and_abi(&self, account: Name) -> Result<RawCodeAndAbi, ChainApiError> {
        self.post("get_raw_code_and_abi", &json!({ "account_name": account }))
            .await
    }

    pub async fn get_currency_balance(
        &self,
        token_contract: Name,
        account: Name,
        symbol: &str,
    ) -> Result<Vec<String>, ChainApiError> {
        self.post(
            "get_currency_balance",
            &json!({ "code": token_contract, "account": account, "symbol": symbol }),
        )
        .await
    }

    pub async fn get_table_rows(
        &self,
        request: &TableRowsRequest,
    ) -> Result<TableRows, ChainApiError> {
        self.post("get_table_rows", request).await
    }

    pub async fn get_producers(
        &self,
        request: &ProducersRequest,
    ) -> Result<Producers, ChainApiError> {
        self.post("get_producers", request).await
    }

    pub async fn get_producer_schedule(&self) -> Result<serde_json::Value, ChainApiError> {
        self.post("get_producer_schedule", &json!({})).await
    }
}

#[async_trait::async_trait]
impl NodeReader for NodeRpcClient {
    async fn get_contract(&self, account: Name) -> Result<AccountChainState, ChainApiError> {
        let raw = self.get_raw_code_and_abi(account).await?;
        Ok(AccountChainState {
            account,
            code: raw.code()?,
            abi: raw.abi()?,
        })
    }
}
