use std::collections::BTreeMap;

use chainapi_lib::{
    abi::{AbiEncoder, BinaryAbiEncoder},
    asset::Asset,
    name::Name,
};

use crate::{
    client::{
        chain_cache::ChainCache,
        deployer::{
            ContractDeployer, DeployOutcome, DeploymentPlan, DeploymentPlanner, DeploymentRequest,
        },
        read::NodeReader,
        tx_broadcast::{ChainTxBroadcast, Transaction, TransactionSubmitter, TxReceipt},
        tx_builder::{ActionArgs, ChainTransactionBuilder, NewAccountParams},
    },
    config::ChainConfig,
    error::ChainApiError,
    rpc::{
        types::{ChainInfo, Producers, ProducersRequest, TableRows, TableRowsRequest},
        NodeRpcClient,
    },
};

pub struct ChainApi<R, S, E = BinaryAbiEncoder> {
    config: ChainConfig,
    cache: ChainCache<R>,
    submitter: S,
    encoder: E,
}

impl<S: TransactionSubmitter> ChainApi<NodeRpcClient, S> {
    /// Reads go to the node configured in `config`.
    pub fn new_simple(config: ChainConfig, submitter: S) -> Self {
        let reader = config.node_rpc_client();
        Self::new(config, reader, submitter)
    }
}

impl<R: NodeReader, S: TransactionSubmitter> ChainApi<R, S> {
    pub fn new(config: ChainConfig, reader: R, submitter: S) -> Self {
        Self::with_encoder(config, reader, submitter, BinaryAbiEncoder)
    }
}

impl<R, S, E> ChainApi<R, S, E>
where
    R: NodeReader,
    S: TransactionSubmitter,
    E: AbiEncoder,
{
    pub fn with_encoder(config: ChainConfig, reader: R, submitter: S, encoder: E) -> Self {
        Self {
            config,
            cache: ChainCache::new(reader),
            submitter,
            encoder,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn cache(&self) -> &ChainCache<R> {
        &self.cache
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn tx_builder(&self) -> ChainTransactionBuilder<'_> {
        ChainTransactionBuilder {
            config: &self.config,
        }
    }

    pub fn planner(&self) -> DeploymentPlanner<'_, R, E> {
        DeploymentPlanner {
            cache: &self.cache,
            encoder: &self.encoder,
            system_contract: self.config.system_contract,
        }
    }

    pub fn deployer(&self) -> ContractDeployer<'_, R, S, E> {
        ContractDeployer {
            planner: self.planner(),
            submitter: &self.submitter,
            submit_timeout: self.config.submit_timeout,
        }
    }

    pub async fn broadcast_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<TxReceipt, ChainApiError> {
        ChainTxBroadcast {
            submitter: &self.submitter,
            timeout: self.config.submit_timeout,
        }
        .broadcast_transaction(transaction)
        .await
    }

    pub async fn push_action(
        &self,
        contract: Name,
        action: Name,
        args: impl Into<ActionArgs>,
        permissions: &BTreeMap<Name, Name>,
    ) -> Result<TxReceipt, ChainApiError> {
        let transaction = self
            .tx_builder()
            .push_action(contract, action, args.into(), permissions);
        self.broadcast_transaction(&transaction).await
    }

    pub async fn transfer(
        &self,
        from: Name,
        to: Name,
        amount: f64,
        memo: &str,
        permission: Name,
    ) -> Result<TxReceipt, ChainApiError> {
        let transaction = self.tx_builder().transfer(from, to, amount, memo, permission)?;
        self.broadcast_transaction(&transaction).await
    }

    pub async fn create_account(
        &self,
        params: &NewAccountParams,
    ) -> Result<TxReceipt, ChainApiError> {
        let transaction = self.tx_builder().create_account(params)?;
        self.broadcast_transaction(&transaction).await
    }

    pub async fn plan_deployment(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeploymentPlan, ChainApiError> {
        self.planner().plan(request).await
    }

    pub async fn deploy_contract(
        &self,
        request: &DeploymentRequest,
    ) -> Result<DeployOutcome, ChainApiError> {
        self.deployer().deploy(request).await
    }
}

impl<S, E> ChainApi<NodeRpcClient, S, E>
where
    S: TransactionSubmitter,
    E: AbiEncoder,
{
    pub fn rpc(&self) -> &NodeRpcClient {
        self.cache.reader()
    }

    /// Points reads at another node. Cached chain state came from the old
    /// node and is dropped.
    pub fn set_node(&mut self, node_url: &str) {
        self.config.node_url = node_url.to_string();
        self.cache.reader_mut().set_node(node_url);
        self.cache.clear();
    }

    pub async fn get_info(&self) -> Result<ChainInfo, ChainApiError> {
        self.rpc().get_info().await
    }

    pub async fn get_chain_id(&self) -> Result<String, ChainApiError> {
        self.rpc().get_chain_id().await
    }

    pub async fn get_account(
        &self,
        account: Name,
    ) -> Result<Option<serde_json::Value>, ChainApiError> {
        self.rpc().get_account(account).await
    }

    pub async fn get_balance(&self, account: Name) -> f64 {
        self.get_token_balance(
            account,
            self.config.main_token_contract,
            &self.config.main_token,
        )
        .await
    }

    /// `0.0` when the account holds none of `symbol` or the lookup fails.
    pub async fn get_token_balance(&self, account: Name, token_contract: Name, symbol: &str) -> f64 {
        let balances = match self
            .rpc()
            .get_currency_balance(token_contract, account, symbol)
            .await
        {
            Ok(balances) => balances,
            Err(err) => {
                tracing::warn!("Failed to read {} balance of {}: {}", symbol, account, err);
                return 0.0;
            }
        };
        parse_first_balance(&balances)
    }

    pub async fn get_table_rows(
        &self,
        request: &TableRowsRequest,
    ) -> Result<TableRows, ChainApiError> {
        self.rpc().get_table_rows(request).await
    }

    pub async fn get_producers(
        &self,
        request: &ProducersRequest,
    ) -> Result<Producers, ChainApiError> {
        self.rpc().get_producers(request).await
    }

    pub async fn get_producer_schedule(&self) -> Result<serde_json::Value, ChainApiError> {
        self.rpc().get_producer_schedule().await
    }
}

fn parse_first_balance(balances: &[String]) -> f64 {
    let Some(first) = balances.first() else {
        return 0.0;
    };
    match first.parse::<Asset>() {
        Ok(asset) => asset.to_f64(),
        Err(err) => {
            tracing::warn!("Unparsable balance {:?}: {}", first, err);
            0.0
        }
    }
}
