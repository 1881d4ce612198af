use std::collections::BTreeMap;

use chainapi_client::{
    client::{deployer::DeploymentRequest, tx_builder::NewAccountParams},
    error::ChainApiError,
};
use chainapi_lib::{
    action::{system, ACTIVE_PERMISSION},
    name,
};
use serde_json::json;

use crate::fixture::chain_fixture::{ChainFixture, HELLO_CODE};

#[tokio::test]
async fn can_create_account_and_deploy() {
    let fixture = ChainFixture::new();
    let mut params = NewAccountParams::new(
        name!("eosio"),
        name!("hello"),
        "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV",
        "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV",
    );
    params.ram_bytes = 64 * 1024;
    params.stake_net = 1.0;
    params.stake_cpu = 1.0;
    let receipt = fixture.api().create_account(&params).await.unwrap();
    assert!(receipt.transaction_id().is_some());

    let names = fixture.chain().submissions()[0]
        .actions
        .iter()
        .map(|a| a.name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![system::NEWACCOUNT, system::BUYRAMBYTES, system::DELEGATEBW]
    );
    assert!(fixture.chain().contract(name!("hello")).is_some());

    let request = DeploymentRequest::new(name!("hello"), HELLO_CODE.to_vec(), ChainFixture::hello_abi());
    fixture.api().deploy_contract(&request).await.unwrap();
    assert_eq!(
        fixture.chain().contract(name!("hello")).unwrap().code,
        Some(HELLO_CODE.to_vec())
    );
}

#[tokio::test]
async fn can_transfer_main_token() {
    let fixture = ChainFixture::new();
    fixture
        .api()
        .transfer(name!("eosio"), name!("alice"), 10.0, "welcome", ACTIVE_PERMISSION)
        .await
        .unwrap();
    let action = &fixture.chain().submissions()[0].actions[0];
    assert_eq!(action.account, name!("eosio.token"));
    assert_eq!(action.data["quantity"], "10.0000 EOS");
    assert_eq!(action.data["memo"], "welcome");
}

#[tokio::test]
async fn can_push_packed_action() {
    let fixture = ChainFixture::new();
    let permissions = BTreeMap::from([(name!("alice"), ACTIVE_PERMISSION)]);
    fixture
        .api()
        .push_action(name!("alice"), name!("sayhello"), vec![0x03_u8, b'b', b'o', b'b'], &permissions)
        .await
        .unwrap();
    let action = &fixture.chain().submissions()[0].actions[0];
    assert_eq!(action.data, json!("03626f62"));
}

#[tokio::test]
async fn cant_hide_chain_errors() {
    let fixture = ChainFixture::new();
    let error = json!({"code": 3090003, "name": "unsatisfied_authorization"});
    fixture.chain().fail_next_submission(error.clone());
    let err = fixture
        .api()
        .transfer(name!("alice"), name!("bob"), 1.0, "", ACTIVE_PERMISSION)
        .await
        .unwrap_err();
    match err {
        ChainApiError::Chain(chain_error) => assert_eq!(chain_error.error, error),
        other => panic!("unexpected error {other}"),
    }
}
