use std::path::{Path, PathBuf};

use anyhow::Context;
use chainapi_client::{
    client::{
        chain_cache::ChainCache,
        deployer::{DeploymentPlanner, DeploymentRequest},
    },
    config::ChainConfig,
    rpc::types::TableRowsRequest,
};
use chainapi_lib::{
    abi::{AbiDef, AbiEncoder, AbiInput, BinaryAbiEncoder},
    code::VM_TYPE_WASM,
    name::Name,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
struct Args {
    /// Overrides CHAINAPI_NODE_URL
    #[clap(long)]
    node: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the node's chain info
    Info,
    Account {
        name: Name,
    },
    /// Print the main token balance of an account
    Balance {
        account: Name,
    },
    Table {
        code: Name,
        scope: String,
        table: Name,
        #[clap(long, default_value_t = 10)]
        limit: u32,
    },
    /// Print the binary form of a JSON ABI as hex
    EncodeAbi {
        file: PathBuf,
    },
    /// Show which of setcode/setabi a deployment would send
    PlanDeploy {
        account: Name,
        #[clap(long)]
        code: PathBuf,
        #[clap(long)]
        abi: PathBuf,
        #[clap(long, default_value_t = VM_TYPE_WASM)]
        vmtype: u8,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let mut config = ChainConfig::load_from_env()?;
    if let Some(node) = args.node {
        config = config.with_node_url(node);
    }
    let rpc = config.node_rpc_client();

    match args.command {
        Command::Info => {
            let info = rpc.get_info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Account { name } => match rpc.get_account(name).await? {
            Some(account) => println!("{}", serde_json::to_string_pretty(&account)?),
            None => println!("account {} does not exist", name),
        },
        Command::Balance { account } => {
            let balances = rpc
                .get_currency_balance(config.main_token_contract, account, &config.main_token)
                .await?;
            match balances.first() {
                Some(balance) => println!("{}", balance),
                None => println!("0 {}", config.main_token),
            }
        }
        Command::Table {
            code,
            scope,
            table,
            limit,
        } => {
            let request = TableRowsRequest::new(code, scope, table).with_limit(limit);
            let rows = rpc.get_table_rows(&request).await?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::EncodeAbi { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let abi = AbiDef::from_json(&json)?;
            println!("{}", hex::encode(BinaryAbiEncoder.encode_abi(&abi)?));
        }
        Command::PlanDeploy {
            account,
            code,
            abi,
            vmtype,
        } => {
            let code = std::fs::read(&code)
                .with_context(|| format!("reading {}", code.display()))?;
            let abi = read_abi_file(&abi)?;
            let cache = ChainCache::new(rpc);
            let planner = DeploymentPlanner {
                cache: &cache,
                encoder: &BinaryAbiEncoder,
                system_contract: config.system_contract,
            };
            let plan = planner
                .plan(&DeploymentRequest::new(account, code, abi).with_vm(vmtype, 0))
                .await?;
            if plan.is_empty() {
                println!("{} is up to date", account);
            } else {
                println!(
                    "{}: setcode = {}, setabi = {}",
                    account,
                    plan.includes_setcode(),
                    plan.includes_setabi()
                );
            }
        }
    }
    Ok(())
}

/// JSON text when the file holds it, otherwise raw ABI bytes.
fn read_abi_file(path: &Path) -> anyhow::Result<AbiInput> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) if text.trim_start().starts_with('{') => AbiInput::Json(text),
        Ok(text) => AbiInput::Raw(text.into_bytes()),
        Err(err) => AbiInput::Raw(err.into_bytes()),
    })
}
