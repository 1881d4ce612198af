use std::time::Duration;

use chainapi_lib::{
    abi::{AbiEncoder, AbiInput},
    action::{system, Action},
    code::VM_TYPE_WASM,
    name::Name,
};

use crate::{
    client::{
        chain_cache::ChainCache,
        read::NodeReader,
        tx_broadcast::{ChainTxBroadcast, Transaction, TransactionSubmitter, TxReceipt},
    },
    error::ChainApiError,
};

/// Target code and ABI for an account.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRequest {
    pub account: Name,
    pub code: Vec<u8>,
    pub abi: AbiInput,
    pub vmtype: u8,
    pub vmversion: u8,
}

impl DeploymentRequest {
    pub fn new(account: Name, code: Vec<u8>, abi: impl Into<AbiInput>) -> Self {
        Self {
            account,
            code,
            abi: abi.into(),
            vmtype: VM_TYPE_WASM,
            vmversion: 0,
        }
    }

    pub fn with_vm(mut self, vmtype: u8, vmversion: u8) -> Self {
        self.vmtype = vmtype;
        self.vmversion = vmversion;
        self
    }
}

/// The minimal set of actions that brings an account to the requested state.
/// `code` and `abi` hold the values to commit to the cache, and are only set
/// when the matching action is part of `actions`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentPlan {
    pub account: Name,
    pub code: Option<Vec<u8>>,
    pub abi: Option<Vec<u8>>,
    pub actions: Vec<Action>,
}

impl DeploymentPlan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn includes_setcode(&self) -> bool {
        self.code.is_some()
    }

    pub fn includes_setabi(&self) -> bool {
        self.abi.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeployOutcome {
    /// Code and ABI already match; nothing was sent.
    NothingToDeploy,
    Deployed {
        receipt: TxReceipt,
        setcode: bool,
        setabi: bool,
    },
}

impl DeployOutcome {
    pub fn receipt(&self) -> Option<&TxReceipt> {
        match self {
            DeployOutcome::NothingToDeploy => None,
            DeployOutcome::Deployed { receipt, .. } => Some(receipt),
        }
    }
}

/// Diffs a request against the cache. Needs no submitter, so it also serves
/// read-only callers.
pub struct DeploymentPlanner<'a, R, E> {
    pub cache: &'a ChainCache<R>,
    pub encoder: &'a E,
    pub system_contract: Name,
}

impl<'a, R, E> DeploymentPlanner<'a, R, E>
where
    R: NodeReader,
    E: AbiEncoder,
{
    /// Compares the request with the cached chain state without sending
    /// anything. A slot with nothing deployed never matches, even an empty
    /// target.
    pub async fn plan(&self, request: &DeploymentRequest) -> Result<DeploymentPlan, ChainApiError> {
        let account = request.account;
        let abi = request.abi.normalize(self.encoder)?;

        let cached_code = self.cache.get_code(account).await?;
        let same_code = cached_code.as_deref() == Some(request.code.as_slice());
        let cached_abi = self.cache.get_abi(account).await?;
        let same_abi = cached_abi.as_deref() == Some(abi.as_slice());
        tracing::debug!(
            "Deployment diff for {}: same_code = {}, same_abi = {}",
            account,
            same_code,
            same_abi
        );

        let mut actions = Vec::with_capacity(2);
        if !same_code {
            actions.push(system::setcode(
                self.system_contract,
                account,
                request.vmtype,
                request.vmversion,
                &request.code,
            ));
        }
        if !same_abi {
            actions.push(system::setabi(self.system_contract, account, &abi));
        }
        Ok(DeploymentPlan {
            account,
            code: (!same_code).then(|| request.code.clone()),
            abi: (!same_abi).then_some(abi),
            actions,
        })
    }
}

pub struct ContractDeployer<'a, R, S, E> {
    pub planner: DeploymentPlanner<'a, R, E>,
    pub submitter: &'a S,
    pub submit_timeout: Option<Duration>,
}

impl<'a, R, S, E> ContractDeployer<'a, R, S, E>
where
    R: NodeReader,
    S: TransactionSubmitter,
    E: AbiEncoder,
{
    pub async fn plan(&self, request: &DeploymentRequest) -> Result<DeploymentPlan, ChainApiError> {
        self.planner.plan(request).await
    }

    /// Sends the planned actions in one transaction and, once it is accepted,
    /// records the new code and ABI in the cache. On any error the cache is
    /// left as it was.
    pub async fn deploy(&self, request: &DeploymentRequest) -> Result<DeployOutcome, ChainApiError> {
        let plan = self.plan(request).await?;
        if plan.is_empty() {
            tracing::info!("Contract of {} is up to date, nothing to deploy", plan.account);
            return Ok(DeployOutcome::NothingToDeploy);
        }
        let transaction = Transaction::new(plan.actions);
        let receipt = ChainTxBroadcast {
            submitter: self.submitter,
            timeout: self.submit_timeout,
        }
        .broadcast_transaction(&transaction)
        .await?;

        let setcode = plan.code.is_some();
        let setabi = plan.abi.is_some();
        if let Some(code) = plan.code {
            self.planner.cache.set_code(plan.account, code);
        }
        if let Some(abi) = plan.abi {
            self.planner.cache.set_abi(plan.account, abi);
        }
        Ok(DeployOutcome::Deployed {
            receipt,
            setcode,
            setabi,
        })
    }
}
