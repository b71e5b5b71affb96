use json_metadata_core::{JsonMetadataError, MetadataRecord};
use json_metadata_test_utils::{assert_program_error, JsonTestContext};
use solana_program_test::tokio;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

#[tokio::test]
async fn test_authority_lifecycle() {
    let ctx = JsonTestContext::new().await;
    let subject = Keypair::new();
    ctx.client.initialize(&subject).await.unwrap();
    let subject = subject.pubkey();
    let owner = ctx.client.payer.pubkey();
    let metadata = ctx.client.metadata_address(&subject);
    let rent = ctx.client.client.get_rent().await.unwrap();

    let delegate = Keypair::new();
    ctx.client.fund(&delegate.pubkey(), 1_000_000_000).await;

    ctx.client.add_authority(&subject, &delegate.pubkey()).await.unwrap();
    let record = ctx.client.get_record(&subject).await;
    assert_eq!(
        record.authorities.as_slice(),
        &[owner.to_bytes(), delegate.pubkey().to_bytes()]
    );
    let account = ctx.client.get_account(&metadata).await.unwrap();
    assert_eq!(account.data.len(), MetadataRecord::space(2));
    assert!(rent.is_exempt(account.lamports, account.data.len()));

    // the new authority can write
    ctx.client
        .set_value_as(&subject, br#"{"editor":"delegate"}"#, &delegate)
        .await
        .unwrap();
    assert_eq!(
        ctx.client.get_document_bytes(&subject).await,
        br#"{"editor":"delegate"}"#.to_vec()
    );

    ctx.client.refresh_blockhash().await;
    let result = ctx.client.add_authority(&subject, &delegate.pubkey()).await;
    assert_program_error(result, JsonMetadataError::AuthorityAlreadyPresent);

    let result = ctx.client.remove_authority(&subject, &Pubkey::new_unique()).await;
    assert_program_error(result, JsonMetadataError::AuthorityNotFound);

    // delegate revokes the original owner
    ctx.client
        .remove_authority_as(&subject, &owner, &delegate)
        .await
        .unwrap();
    let record = ctx.client.get_record(&subject).await;
    assert_eq!(record.authorities.as_slice(), &[delegate.pubkey().to_bytes()]);
    let account = ctx.client.get_account(&metadata).await.unwrap();
    assert_eq!(account.data.len(), MetadataRecord::space(1));
    assert_eq!(account.lamports, rent.minimum_balance(MetadataRecord::space(1)));

    let result = ctx.client.set_value(&subject, br#"{"editor":"owner"}"#).await;
    assert_program_error(result, JsonMetadataError::Unauthorized);

    let result = ctx
        .client
        .remove_authority_as(&subject, &delegate.pubkey(), &delegate)
        .await;
    assert_program_error(result, JsonMetadataError::LastAuthority);
    assert_eq!(ctx.client.get_record(&subject).await, record);
}

#[tokio::test]
async fn test_stranger_cannot_add_itself() {
    let ctx = JsonTestContext::new().await;
    let subject = Keypair::new();
    ctx.client.initialize(&subject).await.unwrap();
    let subject = subject.pubkey();

    let stranger = Keypair::new();
    ctx.client.fund(&stranger.pubkey(), 1_000_000_000).await;
    let ix = json_metadata_client::instructions::add_authority(
        &ctx.program_id,
        &subject,
        &stranger.pubkey(),
        &stranger.pubkey(),
    )
    .unwrap();

    let result = ctx.client.send_tx(&[ix], &[&stranger]).await;
    assert_program_error(result, JsonMetadataError::Unauthorized);
    assert_eq!(ctx.client.get_record(&subject).await.authorities.len(), 1);
}

#[tokio::test]
async fn test_authority_changes_before_initialize() {
    let ctx = JsonTestContext::new().await;
    let subject = Pubkey::new_unique();

    let result = ctx.client.add_authority(&subject, &Pubkey::new_unique()).await;
    assert_program_error(result, JsonMetadataError::NotInitialized);
}
