use std::time::Duration;

use chainapi_lib::action::Action;
use serde::{Deserialize, Serialize};

use crate::error::{ChainApiError, ChainError};

pub const BLOCKS_BEHIND: u32 = 3;
pub const EXPIRE_SECONDS: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub actions: Vec<Action>,
}

impl Transaction {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactOptions {
    pub blocks_behind: u32,
    pub expire_seconds: u32,
}

impl Default for TransactOptions {
    fn default() -> Self {
        Self {
            blocks_behind: BLOCKS_BEHIND,
            expire_seconds: EXPIRE_SECONDS,
        }
    }
}

/// Receipt of an accepted transaction as returned by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxReceipt(pub serde_json::Value);

impl TxReceipt {
    /// Splits a raw submitter response into a receipt or its `error` member.
    pub fn from_response(response: serde_json::Value) -> Result<Self, ChainError> {
        match response.get("error") {
            Some(error) => Err(ChainError::new(error.clone())),
            None => Ok(TxReceipt(response)),
        }
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.0.get("transaction_id").and_then(|id| id.as_str())
    }
}

/// Signs and broadcasts transactions. Key management lives behind this trait.
#[async_trait::async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn transact(
        &self,
        transaction: &Transaction,
        options: &TransactOptions,
    ) -> Result<TxReceipt, ChainError>;
}

pub struct ChainTxBroadcast<'a, S> {
    pub submitter: &'a S,
    pub timeout: Option<Duration>,
}

impl<'a, S: TransactionSubmitter> ChainTxBroadcast<'a, S> {
    pub async fn broadcast_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<TxReceipt, ChainApiError> {
        let options = TransactOptions::default();
        let names = transaction
            .actions
            .iter()
            .map(|action| format!("{}::{}", action.account, action.name))
            .collect::<Vec<_>>();
        tracing::info!("Sending tx {:?}", names);
        let result = match self.timeout {
            Some(timeout) => {
                tokio::time::timeout(timeout, self.submitter.transact(transaction, &options))
                    .await
                    .map_err(|_| {
                        tracing::error!("Transaction TIMED OUT after {:?}", timeout);
                        ChainApiError::Timeout(timeout)
                    })?
            }
            None => self.submitter.transact(transaction, &options).await,
        };
        match result {
            Ok(receipt) => {
                tracing::info!("Transaction PROCESSED, id = {:?}", receipt.transaction_id());
                Ok(receipt)
            }
            Err(err) => {
                tracing::error!("Transaction FAILED, error = {}", err);
                Err(err.into())
            }
        }
    }
}
