use std::collections::BTreeMap;

use chainapi_lib::{
    action::{system, Action, Authority, PermissionLevel},
    asset::Asset,
    name::Name,
};

use crate::{client::tx_broadcast::Transaction, config::ChainConfig, error::ChainApiError};

/// Action arguments, either JSON or already serialized bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionArgs {
    Json(serde_json::Value),
    Packed(Vec<u8>),
}

impl From<serde_json::Value> for ActionArgs {
    fn from(value: serde_json::Value) -> Self {
        ActionArgs::Json(value)
    }
}

impl From<Vec<u8>> for ActionArgs {
    fn from(bytes: Vec<u8>) -> Self {
        ActionArgs::Packed(bytes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAccountParams {
    pub creator: Name,
    pub account: Name,
    pub owner_key: String,
    pub active_key: String,
    pub ram_bytes: u32,
    pub stake_net: f64,
    pub stake_cpu: f64,
}

impl NewAccountParams {
    pub fn new(creator: Name, account: Name, owner_key: &str, active_key: &str) -> Self {
        Self {
            creator,
            account,
            owner_key: owner_key.to_string(),
            active_key: active_key.to_string(),
            ram_bytes: 0,
            stake_net: 0.0,
            stake_cpu: 0.0,
        }
    }
}

pub struct ChainTransactionBuilder<'a> {
    pub config: &'a ChainConfig,
}

impl<'a> ChainTransactionBuilder<'a> {
    /// `permissions` maps each authorizing actor to the permission it signs with.
    pub fn push_action(
        &self,
        contract: Name,
        action: Name,
        args: ActionArgs,
        permissions: &BTreeMap<Name, Name>,
    ) -> Transaction {
        let authorization = permissions
            .iter()
            .map(|(actor, permission)| PermissionLevel::new(*actor, *permission))
            .collect();
        let action = match args {
            ActionArgs::Json(data) => Action::new(contract, action, authorization, data),
            ActionArgs::Packed(bytes) => {
                Action::with_hex_data(contract, action, authorization, &bytes)
            }
        };
        Transaction::new(vec![action])
    }

    pub fn transfer(
        &self,
        from: Name,
        to: Name,
        amount: f64,
        memo: &str,
        permission: Name,
    ) -> Result<Transaction, ChainApiError> {
        let quantity = self.main_token_asset(amount)?;
        Ok(Transaction::new(vec![system::transfer(
            self.config.main_token_contract,
            from,
            to,
            &quantity,
            memo,
            permission,
        )]))
    }

    /// `newaccount`, plus `buyrambytes` when RAM is requested and `delegatebw`
    /// when any stake is requested, in a single transaction.
    pub fn create_account(&self, params: &NewAccountParams) -> Result<Transaction, ChainApiError> {
        let system_contract = self.config.system_contract;
        let mut actions = vec![system::newaccount(
            system_contract,
            params.creator,
            params.account,
            Authority::single_key(params.owner_key.as_str()),
            Authority::single_key(params.active_key.as_str()),
        )];
        if params.ram_bytes > 0 {
            actions.push(system::buyrambytes(
                system_contract,
                params.creator,
                params.account,
                params.ram_bytes,
            ));
        }
        if params.stake_net != 0.0 || params.stake_cpu != 0.0 {
            actions.push(system::delegatebw(
                system_contract,
                params.creator,
                params.account,
                &self.main_token_asset(params.stake_net)?,
                &self.main_token_asset(params.stake_cpu)?,
                true,
            ));
        }
        Ok(Transaction::new(actions))
    }

    fn main_token_asset(&self, amount: f64) -> Result<Asset, ChainApiError> {
        Ok(Asset::from_f64(
            amount,
            self.config.token_precision,
            &self.config.main_token,
        )?)
    }
}
