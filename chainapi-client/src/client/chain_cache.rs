use chainapi_lib::name::Name;
use dashmap::DashMap;

use crate::{
    client::read::{AccountChainState, NodeReader},
    error::ChainApiError,
};

/// Last known code and ABI per account.
///
/// Entries are filled from the node on first access and overwritten after a
/// successful deployment. Changes made on chain by anyone else are not
/// observed, and nothing is evicted for the lifetime of the cache. Concurrent
/// deployments to the same account are not serialized here.
pub struct ChainCache<R> {
    reader: R,
    code: DashMap<Name, Option<Vec<u8>>>,
    abi: DashMap<Name, Option<Vec<u8>>>,
}

impl<R: NodeReader> ChainCache<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            code: DashMap::new(),
            abi: DashMap::new(),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub async fn get_code(&self, account: Name) -> Result<Option<Vec<u8>>, ChainApiError> {
        if let Some(code) = self.code.get(&account) {
            return Ok(code.value().clone());
        }
        self.prime(account).await?;
        Ok(self
            .code
            .get(&account)
            .and_then(|code| code.value().clone()))
    }

    pub async fn get_abi(&self, account: Name) -> Result<Option<Vec<u8>>, ChainApiError> {
        if let Some(abi) = self.abi.get(&account) {
            return Ok(abi.value().clone());
        }
        self.prime(account).await?;
        Ok(self.abi.get(&account).and_then(|abi| abi.value().clone()))
    }

    pub fn set_code(&self, account: Name, code: Vec<u8>) {
        self.code.insert(account, Some(code));
    }

    pub fn set_abi(&self, account: Name, abi: Vec<u8>) {
        self.abi.insert(account, Some(abi));
    }

    /// Cached view of `account` without touching the node. Slots that were
    /// never fetched read as `None`.
    pub fn cached_state(&self, account: Name) -> AccountChainState {
        AccountChainState {
            account,
            code: self.code.get(&account).and_then(|c| c.value().clone()),
            abi: self.abi.get(&account).and_then(|a| a.value().clone()),
        }
    }

    pub fn is_cached(&self, account: Name) -> bool {
        self.code.contains_key(&account) && self.abi.contains_key(&account)
    }

    /// Forgets `account`; the next read goes back to the node.
    pub fn invalidate(&self, account: Name) {
        self.code.remove(&account);
        self.abi.remove(&account);
    }

    pub fn clear(&self) {
        self.code.clear();
        self.abi.clear();
    }

    /// One node read fills both slots, but never overwrites a value that was
    /// committed in the meantime.
    async fn prime(&self, account: Name) -> Result<(), ChainApiError> {
        tracing::debug!("Fetching contract state of {}", account);
        let state = self.reader.get_contract(account).await?;
        self.code.entry(account).or_insert(state.code);
        self.abi.entry(account).or_insert(state.abi);
        Ok(())
    }
}
