use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{asset::Asset, name::Name};

pub const ACTIVE_PERMISSION: Name = Name::from_static("active");
pub const OWNER_PERMISSION: Name = Name::from_static("owner");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    pub actor: Name,
    pub permission: Name,
}

impl PermissionLevel {
    pub fn new(actor: Name, permission: Name) -> Self {
        Self { actor, permission }
    }

    pub fn active(actor: Name) -> Self {
        Self::new(actor, ACTIVE_PERMISSION)
    }
}

/// A single contract call. `data` is either the JSON arguments or the hex of
/// already serialized arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    pub data: serde_json::Value,
}

impl Action {
    pub fn new(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            account,
            name,
            authorization,
            data,
        }
    }

    pub fn with_hex_data(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: &[u8],
    ) -> Self {
        Self::new(account, name, authorization, json!(hex::encode(data)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWeight {
    pub key: String,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
    pub accounts: Vec<serde_json::Value>,
    pub waits: Vec<serde_json::Value>,
}

impl Authority {
    pub fn single_key(key: impl Into<String>) -> Self {
        Self {
            threshold: 1,
            keys: vec![KeyWeight {
                key: key.into(),
                weight: 1,
            }],
            accounts: Vec::new(),
            waits: Vec::new(),
        }
    }
}

/// Builders for the system and token contract actions the client pushes.
pub mod system {
    use super::*;

    pub const SETCODE: Name = Name::from_static("setcode");
    pub const SETABI: Name = Name::from_static("setabi");
    pub const NEWACCOUNT: Name = Name::from_static("newaccount");
    pub const BUYRAMBYTES: Name = Name::from_static("buyrambytes");
    pub const DELEGATEBW: Name = Name::from_static("delegatebw");
    pub const TRANSFER: Name = Name::from_static("transfer");

    pub fn setcode(
        system_contract: Name,
        account: Name,
        vmtype: u8,
        vmversion: u8,
        code: &[u8],
    ) -> Action {
        Action::new(
            system_contract,
            SETCODE,
            vec![PermissionLevel::active(account)],
            json!({
                "account": account,
                "vmtype": vmtype,
                "vmversion": vmversion,
                "code": hex::encode(code),
            }),
        )
    }

    pub fn setabi(system_contract: Name, account: Name, raw_abi: &[u8]) -> Action {
        Action::new(
            system_contract,
            SETABI,
            vec![PermissionLevel::active(account)],
            json!({
                "account": account,
                "abi": hex::encode(raw_abi),
            }),
        )
    }

    pub fn newaccount(
        system_contract: Name,
        creator: Name,
        account: Name,
        owner: Authority,
        active: Authority,
    ) -> Action {
        Action::new(
            system_contract,
            NEWACCOUNT,
            vec![PermissionLevel::active(creator)],
            json!({
                "creator": creator,
                "name": account,
                "owner": owner,
                "active": active,
            }),
        )
    }

    pub fn buyrambytes(system_contract: Name, payer: Name, receiver: Name, bytes: u32) -> Action {
        Action::new(
            system_contract,
            BUYRAMBYTES,
            vec![PermissionLevel::active(payer)],
            json!({
                "payer": payer,
                "receiver": receiver,
                "bytes": bytes,
            }),
        )
    }

    pub fn delegatebw(
        system_contract: Name,
        from: Name,
        receiver: Name,
        stake_net_quantity: &Asset,
        stake_cpu_quantity: &Asset,
        transfer: bool,
    ) -> Action {
        Action::new(
            system_contract,
            DELEGATEBW,
            vec![PermissionLevel::active(from)],
            json!({
                "from": from,
                "receiver": receiver,
                "stake_net_quantity": stake_net_quantity.to_string(),
                "stake_cpu_quantity": stake_cpu_quantity.to_string(),
                "transfer": u8::from(transfer),
            }),
        )
    }

    pub fn transfer(
        token_contract: Name,
        from: Name,
        to: Name,
        quantity: &Asset,
        memo: &str,
        permission: Name,
    ) -> Action {
        Action::new(
            token_contract,
            TRANSFER,
            vec![PermissionLevel::new(from, permission)],
            json!({
                "from": from,
                "to": to,
                "quantity": quantity.to_string(),
                "memo": memo,
            }),
        )
    }
}
