use json_metadata::pda::find_metadata_account_with_program_id;
use json_metadata_core::{record::AuthoritySet, JsonMetadataError, MetadataRecord};
use json_metadata_test_utils::{assert_instruction_error, assert_program_error, JsonTestContext};
use serde_json::json;
use solana_program_test::tokio;
use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    rent::Rent,
    signature::{Keypair, Signer},
};

async fn initialized() -> (JsonTestContext, Keypair) {
    let ctx = JsonTestContext::new().await;
    let subject = Keypair::new();
    ctx.client.initialize(&subject).await.unwrap();
    (ctx, subject)
}

#[tokio::test]
async fn test_incremental_build() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();

    ctx.client.set_value(&subject, br#"{"name":"Bread"}"#).await.unwrap();
    assert_eq!(ctx.client.get_document_bytes(&subject).await, br#"{"name":"Bread"}"#.to_vec());

    ctx.client.set_value(&subject, br#"{"symbol":"BRD"}"#).await.unwrap();
    ctx.client
        .set_value(&subject, br#"{"attributes":[{"trait_type":"crust","value":"sourdough"}]}"#)
        .await
        .unwrap();
    // replaces in place, key order is kept
    ctx.client.set_value(&subject, br#"{"name":"Loaf"}"#).await.unwrap();

    assert_eq!(
        ctx.client.get_document_bytes(&subject).await,
        br#"{"name":"Loaf","symbol":"BRD","attributes":[{"trait_type":"crust","value":"sourdough"}]}"#
            .to_vec()
    );
}

#[tokio::test]
async fn test_token_metadata_in_two_writes() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();

    ctx.client
        .set_value(&subject, br#"{"name":"Bread On-Chain","symbol":"BREAD"}"#)
        .await
        .unwrap();
    ctx.client
        .set_value(&subject, br#"{"description":"A bread!","seller_fee_basis_points":500}"#)
        .await
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(ctx.client.get_document(&subject).await),
        json!({
            "name": "Bread On-Chain",
            "symbol": "BREAD",
            "description": "A bread!",
            "seller_fee_basis_points": 500
        })
    );
}

#[tokio::test]
async fn test_merge_is_shallow() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();

    ctx.client
        .set_value(&subject, br#"{"properties":{"files":[1],"category":"image"}}"#)
        .await
        .unwrap();
    ctx.client
        .set_value(&subject, br#"{"properties":{"creators":[]}}"#)
        .await
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(ctx.client.get_document(&subject).await),
        json!({"properties": {"creators": []}})
    );
}

#[tokio::test]
async fn test_set_value_is_idempotent() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();
    let fragment = br#"{"description":"A loaf of bread","external_url":"https://example.com"}"#;

    ctx.client.set_value(&subject, fragment).await.unwrap();
    let first = ctx.client.get_account(&subject).await.unwrap();

    ctx.client.refresh_blockhash().await;
    ctx.client.set_value(&subject, fragment).await.unwrap();
    let second = ctx.client.get_account(&subject).await.unwrap();

    assert_eq!(first.data, second.data);
    assert_eq!(first.lamports, second.lamports);
}

#[tokio::test]
async fn test_capacity_grows_and_never_shrinks() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();
    let rent = ctx.client.client.get_rent().await.unwrap();

    let long_value = "x".repeat(900);
    let fragment = serde_json::to_vec(&json!({ "blob": long_value })).unwrap();
    ctx.client.set_value(&subject, &fragment).await.unwrap();

    let grown = ctx.client.get_account(&subject).await.unwrap();
    assert_eq!(grown.data.len(), fragment.len());
    assert!(rent.is_exempt(grown.lamports, grown.data.len()));

    ctx.client.set_value(&subject, br#"{"blob":"y"}"#).await.unwrap();

    let after = ctx.client.get_account(&subject).await.unwrap();
    assert_eq!(after.data.len(), grown.data.len());
    assert!(after.data.starts_with(br#"{"blob":"y"}"#));
    assert!(after.data[br#"{"blob":"y"}"#.len()..].iter().all(|b| *b == b' '));
    assert_eq!(ctx.client.get_document_bytes(&subject).await, br#"{"blob":"y"}"#.to_vec());
}

#[tokio::test]
async fn test_growth_across_many_fragments() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();

    for i in 0..12 {
        let mut updates = serde_json::Map::new();
        updates.insert(format!("key_{:02}", i), json!("v".repeat(400)));
        let fragment = serde_json::to_vec(&updates).unwrap();
        ctx.client.set_value(&subject, &fragment).await.unwrap();
    }

    let document = ctx.client.get_document(&subject).await;
    assert_eq!(document.len(), 12);
    assert_eq!(document.keys().next().map(String::as_str), Some("key_00"));
    let account = ctx.client.get_account(&subject).await.unwrap();
    assert_eq!(account.data.len(), ctx.client.get_document_bytes(&subject).await.len());
}

#[tokio::test]
async fn test_malformed_fragment_is_rejected() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();
    ctx.client.set_value(&subject, br#"{"a":1}"#).await.unwrap();

    let fragments: [&[u8]; 5] = [b"{not json", b"[1,2,3]", b"\"text\"", b"", b"{\"a\":1} trailing"];
    for fragment in fragments {
        let result = ctx.client.set_value(&subject, fragment).await;
        assert_program_error(result, JsonMetadataError::MalformedFragment);
    }

    assert_eq!(ctx.client.get_document_bytes(&subject).await, br#"{"a":1}"#.to_vec());
}

#[tokio::test]
async fn test_unauthorized_signer_changes_nothing() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();
    ctx.client.set_value(&subject, br#"{"name":"Bread"}"#).await.unwrap();

    let metadata = ctx.client.metadata_address(&subject);
    let subject_before = ctx.client.get_account(&subject).await.unwrap();
    let metadata_before = ctx.client.get_account(&metadata).await.unwrap();

    let stranger = Keypair::new();
    ctx.client.fund(&stranger.pubkey(), 1_000_000_000).await;
    let result = ctx
        .client
        .set_value_as(&subject, br#"{"name":"Stolen"}"#, &stranger)
        .await;
    assert_program_error(result, JsonMetadataError::Unauthorized);

    assert_eq!(ctx.client.get_account(&subject).await.unwrap(), subject_before);
    assert_eq!(ctx.client.get_account(&metadata).await.unwrap(), metadata_before);
}

#[tokio::test]
async fn test_set_value_before_initialize() {
    let ctx = JsonTestContext::new().await;
    let subject = Pubkey::new_unique();

    let result = ctx.client.set_value(&subject, br#"{"a":1}"#).await;
    assert_program_error(result, JsonMetadataError::NotInitialized);
}

#[tokio::test]
async fn test_set_value_rejects_wrong_metadata_address() {
    let (ctx, subject) = initialized().await;
    let other = Keypair::new();
    ctx.client.initialize(&other).await.unwrap();

    let mut ix = ctx
        .client
        .set_value_ix(&subject.pubkey(), &ctx.client.payer.pubkey(), br#"{"a":1}"#);
    // a valid record, but for another subject
    ix.accounts[1] = AccountMeta::new(ctx.client.metadata_address(&other.pubkey()), false);

    let result = ctx.client.send_tx(&[ix], &[]).await;
    assert_program_error(result, JsonMetadataError::AddressMismatch);
}

#[tokio::test]
async fn test_set_value_requires_payer_signature() {
    let (ctx, subject) = initialized().await;
    let authority = ctx.client.payer.pubkey();

    let mut ix = ctx.client.set_value_ix(&subject.pubkey(), &authority, br#"{"a":1}"#);
    let unsigned = Pubkey::new_unique();
    ix.accounts[2] = AccountMeta::new(unsigned, false);

    let result = ctx.client.send_tx(&[ix], &[]).await;
    assert_instruction_error(result, InstructionError::MissingRequiredSignature);
}

#[tokio::test]
async fn test_payer_without_funds_cannot_grow() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();

    let poor = Keypair::new();
    ctx.client.fund(&poor.pubkey(), 1_000_000).await;
    ctx.client.add_authority(&subject, &poor.pubkey()).await.unwrap();

    let fragment = serde_json::to_vec(&json!({ "blob": "z".repeat(600) })).unwrap();
    let result = ctx.client.set_value_as(&subject, &fragment, &poor).await;
    assert_program_error(result, JsonMetadataError::CapacityGrowthFailed);

    assert_eq!(ctx.client.get_document_bytes(&subject).await, b"{}".to_vec());
    assert_eq!(ctx.client.get_account(&subject).await.unwrap().data.len(), 2);

    // fits without growth
    ctx.client.set_value_as(&subject, b"{}", &poor).await.unwrap();
}

#[tokio::test]
async fn test_payer_must_stay_rent_exempt_after_growth() {
    let (ctx, subject) = initialized().await;
    let subject = subject.pubkey();
    let rent = ctx.client.client.get_rent().await.unwrap();

    let fragment = serde_json::to_vec(&json!({ "b": "z".repeat(62) })).unwrap();
    let current = ctx.client.get_account(&subject).await.unwrap();
    let shortfall = rent.minimum_balance(fragment.len()) - current.lamports;

    // enough for the growth, one lamport short of staying exempt
    let payer = Keypair::new();
    ctx.client
        .fund(&payer.pubkey(), rent.minimum_balance(0) + shortfall - 1)
        .await;
    ctx.client.add_authority(&subject, &payer.pubkey()).await.unwrap();

    let result = ctx.client.set_value_as(&subject, &fragment, &payer).await;
    assert_program_error(result, JsonMetadataError::CapacityGrowthFailed);
    assert_eq!(ctx.client.get_account(&subject).await.unwrap(), current);

    ctx.client.fund(&payer.pubkey(), 1).await;
    ctx.client.refresh_blockhash().await;
    ctx.client.set_value_as(&subject, &fragment, &payer).await.unwrap();

    assert_eq!(ctx.client.get_document_bytes(&subject).await, fragment);
    let payer_account = ctx.client.get_account(&payer.pubkey()).await.unwrap();
    assert_eq!(payer_account.lamports, rent.minimum_balance(0));
}

#[tokio::test]
async fn test_unknown_instructions_are_rejected() {
    let (ctx, subject) = initialized().await;
    let template = ctx
        .client
        .set_value_ix(&subject.pubkey(), &ctx.client.payer.pubkey(), b"{}");

    for data in [vec![], vec![1], vec![3, 0, 0, 0, 0], vec![6], vec![0, 0]] {
        let ix = Instruction {
            data,
            ..template.clone()
        };
        let result = ctx.client.send_tx(&[ix], &[]).await;
        assert_program_error(result, JsonMetadataError::InvalidInstruction);
    }
}

fn preloaded(subject: &Pubkey, record_bytes: Vec<u8>) -> Vec<(Pubkey, Account)> {
    let document = br#"{"name":"Frozen Bread"}"#.to_vec();
    let (metadata, _) = find_metadata_account_with_program_id(&json_metadata::ID, subject);
    vec![
        (
            *subject,
            Account {
                lamports: Rent::default().minimum_balance(document.len()),
                data: document,
                owner: json_metadata::ID,
                executable: false,
                rent_epoch: 0,
            },
        ),
        (
            metadata,
            Account {
                lamports: Rent::default().minimum_balance(record_bytes.len()),
                data: record_bytes,
                owner: json_metadata::ID,
                executable: false,
                rent_epoch: 0,
            },
        ),
    ]
}

#[tokio::test]
async fn test_frozen_document_rejects_writes() {
    let subject = Pubkey::new_unique();
    let (_, bump) = find_metadata_account_with_program_id(&json_metadata::ID, &subject);
    let record = MetadataRecord {
        bump,
        mutable: false,
        authorities: AuthoritySet::with_authority(Pubkey::new_unique().to_bytes()),
    };
    let ctx = JsonTestContext::with_accounts(preloaded(&subject, record.encode().unwrap())).await;

    let result = ctx.client.set_value(&subject, br#"{"name":"Thawed"}"#).await;
    assert_program_error(result, JsonMetadataError::Frozen);
    assert_eq!(
        ctx.client.get_document_bytes(&subject).await,
        br#"{"name":"Frozen Bread"}"#.to_vec()
    );
}

#[tokio::test]
async fn test_malformed_record_rejects_writes() {
    let subject = Pubkey::new_unique();
    let (_, bump) = find_metadata_account_with_program_id(&json_metadata::ID, &subject);
    // claims two authorities but holds one
    let mut record_bytes = vec![bump, 1, 2, 0, 0, 0];
    record_bytes.extend_from_slice(&[7u8; 32]);
    let ctx = JsonTestContext::with_accounts(preloaded(&subject, record_bytes)).await;

    let result = ctx.client.set_value(&subject, br#"{"a":1}"#).await;
    assert_program_error(result, JsonMetadataError::MalformedRecord);
}

#[tokio::test]
async fn test_record_with_wrong_bump_is_rejected() {
    let subject = Pubkey::new_unique();
    let (_, bump) = find_metadata_account_with_program_id(&json_metadata::ID, &subject);
    let record = MetadataRecord::new(bump.wrapping_sub(1), [9u8; 32]);
    let ctx = JsonTestContext::with_accounts(preloaded(&subject, record.encode().unwrap())).await;

    let result = ctx.client.set_value(&subject, br#"{"a":1}"#).await;
    assert_program_error(result, JsonMetadataError::AddressMismatch);
}
