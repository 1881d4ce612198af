use chainapi_client::{
    client::deployer::{DeployOutcome, DeploymentRequest},
    error::ChainApiError,
};
use chainapi_lib::{
    abi::AbiInput,
    action::{system, PermissionLevel},
    code::{package_mpy_module, VM_TYPE_MPY},
    name,
};
use serde_json::json;

use crate::fixture::chain_fixture::{ChainFixture, ALICE, HELLO_CODE};

fn hello_request() -> DeploymentRequest {
    DeploymentRequest::new(ALICE, HELLO_CODE.to_vec(), ChainFixture::hello_abi())
}

#[tokio::test]
async fn can_deploy_to_fresh_account() {
    let fixture = ChainFixture::new();
    let outcome = fixture.api().deploy_contract(&hello_request()).await.unwrap();
    assert!(matches!(
        outcome,
        DeployOutcome::Deployed {
            setcode: true,
            setabi: true,
            ..
        }
    ));

    let submissions = fixture.chain().submissions();
    assert_eq!(submissions.len(), 1);
    let actions = &submissions[0].actions;
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].name, system::SETCODE);
    assert_eq!(actions[1].name, system::SETABI);
    assert!(actions
        .iter()
        .all(|a| a.account == name!("eosio") && a.authorization == vec![PermissionLevel::active(ALICE)]));

    let options = fixture.chain().last_options().unwrap();
    assert_eq!((options.blocks_behind, options.expire_seconds), (3, 30));

    let on_chain = fixture.chain().contract(ALICE).unwrap();
    assert_eq!(on_chain.code, Some(HELLO_CODE.to_vec()));
    assert_eq!(on_chain.abi, Some(ChainFixture::hello_abi_bytes()));
    assert_eq!(fixture.api().cache().cached_state(ALICE), on_chain);
}

#[tokio::test]
async fn can_skip_identical_redeploy() {
    let fixture = ChainFixture::new();
    fixture.api().deploy_contract(&hello_request()).await.unwrap();
    let outcome = fixture.api().deploy_contract(&hello_request()).await.unwrap();
    assert_eq!(outcome, DeployOutcome::NothingToDeploy);
    assert_eq!(fixture.chain().submissions().len(), 1);
    assert_eq!(fixture.chain().reads(), 1);
}

#[tokio::test]
async fn can_send_only_what_changed() {
    let fixture = ChainFixture::new();
    fixture.api().deploy_contract(&hello_request()).await.unwrap();

    let new_code = DeploymentRequest::new(ALICE, vec![0x00, 0x61, 0x73, 0x6d, 0x02], ChainFixture::hello_abi());
    fixture.api().deploy_contract(&new_code).await.unwrap();
    let last = fixture.chain().submissions().pop().unwrap();
    assert_eq!(last.actions.len(), 1);
    assert_eq!(last.actions[0].name, system::SETCODE);

    let mut abi = ChainFixture::hello_abi();
    abi["version"] = json!("eosio::abi/1.2");
    let new_abi = DeploymentRequest::new(ALICE, vec![0x00, 0x61, 0x73, 0x6d, 0x02], abi);
    let outcome = fixture.api().deploy_contract(&new_abi).await.unwrap();
    assert!(matches!(
        outcome,
        DeployOutcome::Deployed {
            setcode: false,
            setabi: true,
            ..
        }
    ));
    let last = fixture.chain().submissions().pop().unwrap();
    assert_eq!(last.actions.len(), 1);
    assert_eq!(last.actions[0].name, system::SETABI);
}

#[tokio::test]
async fn can_treat_abi_forms_alike() {
    let fixture = ChainFixture::new();
    fixture.api().deploy_contract(&hello_request()).await.unwrap();
    let cached = fixture.api().cache().cached_state(ALICE).abi;

    let as_json = AbiInput::Json(ChainFixture::hello_abi().to_string());
    let as_raw = AbiInput::Raw(ChainFixture::hello_abi_bytes());
    for abi in [as_json, as_raw] {
        let request = DeploymentRequest::new(ALICE, HELLO_CODE.to_vec(), abi);
        let outcome = fixture.api().deploy_contract(&request).await.unwrap();
        assert_eq!(outcome, DeployOutcome::NothingToDeploy);
        assert_eq!(fixture.api().cache().cached_state(ALICE).abi, cached);
    }
    assert_eq!(fixture.chain().submissions().len(), 1);
}

#[tokio::test]
async fn can_detect_existing_contract_on_first_access() {
    let fixture = ChainFixture::new();
    fixture.chain().set_contract(
        ALICE,
        Some(HELLO_CODE.to_vec()),
        Some(ChainFixture::hello_abi_bytes()),
    );
    let outcome = fixture.api().deploy_contract(&hello_request()).await.unwrap();
    assert_eq!(outcome, DeployOutcome::NothingToDeploy);
    assert!(fixture.chain().submissions().is_empty());
    assert_eq!(fixture.chain().reads(), 1);
}

#[tokio::test]
async fn can_retry_after_failed_submission() {
    let fixture = ChainFixture::new();
    let error = json!({"code": 3080004, "name": "tx_cpu_usage_exceeded", "what": "Transaction exceeded the current CPU usage limit"});
    fixture.chain().fail_next_submission(error.clone());

    let err = fixture.api().deploy_contract(&hello_request()).await.unwrap_err();
    assert_eq!(err.payload(), Some(&error));
    assert!(err.to_string().contains("tx_cpu_usage_exceeded"));
    let cached = fixture.api().cache().cached_state(ALICE);
    assert_eq!((cached.code, cached.abi), (None, None));

    fixture.api().deploy_contract(&hello_request()).await.unwrap();
    let submissions = fixture.chain().submissions();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0], submissions[1]);
}

#[tokio::test]
async fn cant_deploy_to_unknown_account() {
    let fixture = ChainFixture::new();
    let request = DeploymentRequest::new(name!("nobody"), HELLO_CODE.to_vec(), ChainFixture::hello_abi());
    let err = fixture.api().deploy_contract(&request).await.unwrap_err();
    assert!(matches!(err, ChainApiError::Rpc { .. }));
    assert!(!fixture.api().cache().is_cached(name!("nobody")));
    assert!(fixture.chain().submissions().is_empty());
}

#[tokio::test]
async fn cant_deploy_malformed_abi() {
    let fixture = ChainFixture::new();
    let request = DeploymentRequest::new(ALICE, HELLO_CODE.to_vec(), json!({"version": "other/1.0"}));
    let err = fixture.api().deploy_contract(&request).await.unwrap_err();
    assert!(matches!(err, ChainApiError::Encoding(_)));
    assert_eq!(fixture.chain().reads(), 0);
    assert!(fixture.chain().submissions().is_empty());
}

#[tokio::test]
async fn can_miss_out_of_band_change_until_invalidated() {
    let fixture = ChainFixture::new();
    fixture.api().deploy_contract(&hello_request()).await.unwrap();
    fixture.chain().set_contract(ALICE, None, None);

    let outcome = fixture.api().deploy_contract(&hello_request()).await.unwrap();
    assert_eq!(outcome, DeployOutcome::NothingToDeploy);

    fixture.api().cache().invalidate(ALICE);
    let outcome = fixture.api().deploy_contract(&hello_request()).await.unwrap();
    assert!(matches!(
        outcome,
        DeployOutcome::Deployed {
            setcode: true,
            setabi: true,
            ..
        }
    ));
    assert_eq!(fixture.chain().reads(), 2);
}

#[tokio::test]
async fn can_deploy_mpy_module() {
    let fixture = ChainFixture::new();
    let module = package_mpy_module(b"\x4d\x05\x00\x1f");
    let request = DeploymentRequest::new(ALICE, module.clone(), ChainFixture::hello_abi())
        .with_vm(VM_TYPE_MPY, 0);
    let plan = fixture.api().plan_deployment(&request).await.unwrap();
    assert_eq!(plan.actions[0].data["vmtype"], 1);
    assert!(fixture.chain().submissions().is_empty());

    fixture.api().deploy_contract(&request).await.unwrap();
    assert_eq!(fixture.chain().contract(ALICE).unwrap().code, Some(module));
}

#[tokio::test]
async fn can_clear_bare_account_with_empty_contract() {
    let fixture = ChainFixture::new();
    let request = DeploymentRequest::new(ALICE, Vec::new(), AbiInput::Raw(Vec::new()));
    fixture.api().deploy_contract(&request).await.unwrap();
    let submissions = fixture.chain().submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].actions.len(), 2);

    let outcome = fixture.api().deploy_contract(&request).await.unwrap();
    assert_eq!(outcome, DeployOutcome::NothingToDeploy);
    assert_eq!(fixture.chain().submissions().len(), 1);
}

#[tokio::test]
async fn can_deploy_typed_abi() {
    let fixture = ChainFixture::new();
    let abi = chainapi_lib::abi::AbiDef::from_value(ChainFixture::hello_abi()).unwrap();
    fixture.api().deploy_contract(&hello_request()).await.unwrap();
    let request = DeploymentRequest::new(ALICE, HELLO_CODE.to_vec(), abi);
    let outcome = fixture.api().deploy_contract(&request).await.unwrap();
    assert_eq!(outcome, DeployOutcome::NothingToDeploy);
}
