use chainapi_lib::name::Name;
use serde::{Deserialize, Serialize};

use crate::error::ChainApiError;

/// What is deployed on an account as far as the client knows. `None` means
/// no contract code (or ABI) is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountChainState {
    pub account: Name,
    pub code: Option<Vec<u8>>,
    pub abi: Option<Vec<u8>>,
}

impl AccountChainState {
    pub fn empty(account: Name) -> Self {
        Self {
            account,
            code: None,
            abi: None,
        }
    }
}

/// Read access to the deployed contract of an account.
///
/// Implementations return an empty state when the account exists without a
/// contract, and an error when the account does not exist or the node call
/// fails.
#[async_trait::async_trait]
pub trait NodeReader: Send + Sync {
    async fn get_contract(&self, account: Name) -> Result<AccountChainState, ChainApiError>;
}
