use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chainapi_client::{
    client::{
        read::{AccountChainState, NodeReader},
        tx_broadcast::{TransactOptions, Transaction, TransactionSubmitter, TxReceipt},
    },
    error::{ChainApiError, ChainError},
};
use chainapi_lib::{
    action::{system, Action},
    name::Name,
};
use serde_json::{json, Value};

#[derive(Default)]
struct ChainState {
    accounts: HashMap<Name, AccountChainState>,
    submissions: Vec<(Transaction, TransactOptions)>,
    reads: usize,
    next_failure: Option<Value>,
}

/// A node and signer in one: reads serve the stored accounts, accepted
/// transactions apply `setcode`, `setabi` and `newaccount` to them.
#[derive(Clone, Default)]
pub struct InMemoryChain {
    state: Arc<Mutex<ChainState>>,
}

impl InMemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account(&self, account: Name) {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(account, AccountChainState::empty(account));
    }

    /// Changes an account behind the client's back.
    pub fn set_contract(&self, account: Name, code: Option<Vec<u8>>, abi: Option<Vec<u8>>) {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(account, AccountChainState { account, code, abi });
    }

    pub fn contract(&self, account: Name) -> Option<AccountChainState> {
        self.state.lock().unwrap().accounts.get(&account).cloned()
    }

    pub fn fail_next_submission(&self, error: Value) {
        self.state.lock().unwrap().next_failure = Some(error);
    }

    pub fn submissions(&self) -> Vec<Transaction> {
        self.state
            .lock()
            .unwrap()
            .submissions
            .iter()
            .map(|(tx, _)| tx.clone())
            .collect()
    }

    pub fn last_options(&self) -> Option<TransactOptions> {
        self.state
            .lock()
            .unwrap()
            .submissions
            .last()
            .map(|(_, options)| *options)
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }
}

fn name_field(action: &Action, field: &str) -> Name {
    serde_json::from_value(action.data[field].clone()).unwrap()
}

fn bytes_field(action: &Action, field: &str) -> Option<Vec<u8>> {
    let bytes = hex::decode(action.data[field].as_str().unwrap()).unwrap();
    (!bytes.is_empty()).then_some(bytes)
}

impl ChainState {
    fn check(&self, action: &Action) -> Result<(), ChainError> {
        let target = match action.name {
            system::SETCODE | system::SETABI => name_field(action, "account"),
            _ => return Ok(()),
        };
        if self.accounts.contains_key(&target) {
            Ok(())
        } else {
            Err(ChainError::new(json!({
                "code": 3010001,
                "name": "name_type_exception",
                "what": format!("unknown account {}", target),
            })))
        }
    }

    fn apply(&mut self, action: &Action) {
        match action.name {
            system::SETCODE => {
                let account = name_field(action, "account");
                let code = bytes_field(action, "code");
                if let Some(state) = self.accounts.get_mut(&account) {
                    state.code = code;
                }
            }
            system::SETABI => {
                let account = name_field(action, "account");
                let abi = bytes_field(action, "abi");
                if let Some(state) = self.accounts.get_mut(&account) {
                    state.abi = abi;
                }
            }
            system::NEWACCOUNT => {
                let account = name_field(action, "name");
                self.accounts
                    .insert(account, AccountChainState::empty(account));
            }
            _ => {}
        }
    }
}

#[async_trait::async_trait]
impl NodeReader for InMemoryChain {
    async fn get_contract(&self, account: Name) -> Result<AccountChainState, ChainApiError> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;
        state
            .accounts
            .get(&account)
            .cloned()
            .ok_or_else(|| ChainApiError::Rpc {
                endpoint: "get_raw_code_and_abi".to_string(),
                body: json!({
                    "code": 500,
                    "message": "Internal Service Error",
                    "error": {"name": "unknown_key_exception", "what": "Key Not Found"},
                }),
            })
    }
}

#[async_trait::async_trait]
impl TransactionSubmitter for InMemoryChain {
    async fn transact(
        &self,
        transaction: &Transaction,
        options: &TransactOptions,
    ) -> Result<TxReceipt, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.submissions.push((transaction.clone(), *options));
        if let Some(error) = state.next_failure.take() {
            return Err(ChainError::new(error));
        }
        for action in &transaction.actions {
            state.check(action)?;
        }
        for action in &transaction.actions {
            state.apply(action);
        }
        Ok(TxReceipt(json!({
            "transaction_id": format!("{:064x}", state.submissions.len()),
            "processed": {"receipt": {"status": "executed"}},
        })))
    }
}
