//! Main JsonMetadataClient implementation.

use std::sync::Arc;

use async_trait::async_trait;
use json_metadata::pda::find_metadata_account_with_program_id;
use json_metadata_core::{document::JsonObject, MetadataRecord};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::{
    api::JsonMetadataApi,
    config::{ConfigError, JsonClientConfig, JsonClientConfigBuilder},
    errors::{JsonClientError, JsonClientResult},
    rpc::RetryExecutor,
};

/// Client for the JSON metadata program.
///
/// Writes are signed by the configured payer, which funds rent and acts as
/// the authority. Transient RPC failures are retried with exponential backoff.
pub struct JsonMetadataClient {
    pub(crate) config: JsonClientConfig,
    pub(crate) rpc: Arc<RpcClient>,
    pub(crate) retry_executor: RetryExecutor,
}

impl JsonMetadataClient {
    /// Create a client for the default program address.
    ///
    /// `payer_private_key` is the 64-byte keypair.
    pub fn new(rpc_url: &str, payer_private_key: &[u8]) -> JsonClientResult<Self> {
        let payer = Keypair::from_bytes(payer_private_key)
            .map_err(|e| ConfigError::InvalidKeypair(e.to_string()))?;

        let config = JsonClientConfigBuilder::new()
            .rpc_url(rpc_url)
            .payer(payer)
            .build()?;

        Ok(Self::with_config(config))
    }

    pub fn with_config(config: JsonClientConfig) -> Self {
        let rpc = Arc::new(RpcClient::new_with_commitment(
            config.rpc_url.clone(),
            config.commitment,
        ));
        let retry_executor = RetryExecutor::new(config.retry.clone());

        Self {
            config,
            rpc,
            retry_executor,
        }
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.config.payer.pubkey()
    }

    pub fn program_id(&self) -> Pubkey {
        self.config.program_id
    }

    /// Metadata account address of `subject` under the configured program.
    pub fn metadata_address(&self, subject: &Pubkey) -> Pubkey {
        find_metadata_account_with_program_id(&self.config.program_id, subject).0
    }

    /// Send a transaction and wait for confirmation.
    pub(crate) async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> JsonClientResult<Signature> {
        self.retry_executor
            .execute(|| self.send_tx(instructions, extra_signers))
            .await
    }

    async fn send_tx(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> JsonClientResult<Signature> {
        let recent_blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(JsonClientError::from_rpc)?;

        let mut signers: Vec<&Keypair> = vec![self.config.payer.as_ref()];
        signers.extend(extra_signers);

        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.config.payer.pubkey()),
            &signers,
            recent_blockhash,
        );

        self.rpc
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(JsonClientError::from_rpc)
    }
}

#[async_trait]
impl JsonMetadataApi for JsonMetadataClient {
    async fn initialize(&self, subject: &Keypair) -> Result<Signature, JsonClientError> {
        self.initialize_impl(subject).await
    }

    async fn initialize_with_capacity(
        &self,
        subject: &Keypair,
        capacity: usize,
    ) -> Result<Signature, JsonClientError> {
        self.initialize_with_capacity_impl(subject, capacity).await
    }

    async fn set_value(
        &self,
        subject: &Pubkey,
        updates: &JsonObject,
    ) -> Result<Vec<Signature>, JsonClientError> {
        self.set_value_impl(subject, updates).await
    }

    async fn set_fragment(
        &self,
        subject: &Pubkey,
        fragment: &[u8],
    ) -> Result<Signature, JsonClientError> {
        self.set_fragment_impl(subject, fragment).await
    }

    async fn add_authority(
        &self,
        subject: &Pubkey,
        new_authority: &Pubkey,
    ) -> Result<Signature, JsonClientError> {
        self.add_authority_impl(subject, new_authority).await
    }

    async fn remove_authority(
        &self,
        subject: &Pubkey,
        authority: &Pubkey,
    ) -> Result<Signature, JsonClientError> {
        self.remove_authority_impl(subject, authority).await
    }

    async fn get_metadata(&self, subject: &Pubkey) -> Result<MetadataRecord, JsonClientError> {
        self.get_metadata_impl(subject).await
    }

    async fn get_document(&self, subject: &Pubkey) -> Result<JsonObject, JsonClientError> {
        self.get_document_impl(subject).await
    }
}
