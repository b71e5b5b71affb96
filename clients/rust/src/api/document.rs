//! Document reads and writes.

use json_metadata_core::{document, JsonMetadataError, MetadataRecord};
use solana_sdk::{
    account::Account,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    client::JsonMetadataClient,
    errors::{JsonClientError, JsonClientResult},
    fragments::split_object,
    instructions,
};

impl JsonMetadataClient {
    pub async fn initialize_impl(&self, subject: &Keypair) -> JsonClientResult<Signature> {
        let ix = instructions::initialize(
            &self.config.program_id,
            &subject.pubkey(),
            &self.payer_pubkey(),
        )?;
        let signature = self.send_and_confirm(&[ix], &[subject]).await?;
        tracing::info!(subject = %subject.pubkey(), %signature, "Initialized document");
        Ok(signature)
    }

    pub async fn initialize_with_capacity_impl(
        &self,
        subject: &Keypair,
        capacity: usize,
    ) -> JsonClientResult<Signature> {
        let lamports = self
            .retry_executor
            .execute(|| async {
                self.rpc
                    .get_minimum_balance_for_rent_exemption(capacity)
                    .await
                    .map_err(JsonClientError::from_rpc)
            })
            .await?;

        let create = instructions::create_subject_account(
            &self.config.program_id,
            &subject.pubkey(),
            &self.payer_pubkey(),
            lamports,
            capacity as u64,
        );
        let init = instructions::initialize(
            &self.config.program_id,
            &subject.pubkey(),
            &self.payer_pubkey(),
        )?;
        let signature = self.send_and_confirm(&[create, init], &[subject]).await?;
        tracing::info!(
            subject = %subject.pubkey(),
            capacity,
            %signature,
            "Initialized preallocated document"
        );
        Ok(signature)
    }

    pub async fn set_value_impl(
        &self,
        subject: &Pubkey,
        updates: &document::JsonObject,
    ) -> JsonClientResult<Vec<Signature>> {
        let fragments = split_object(updates, self.config.max_fragment_len)?;
        tracing::debug!(%subject, fragments = fragments.len(), "Writing document update");

        let mut signatures = Vec::with_capacity(fragments.len());
        for fragment in &fragments {
            signatures.push(self.set_fragment_impl(subject, fragment).await?);
        }
        Ok(signatures)
    }

    pub async fn set_fragment_impl(
        &self,
        subject: &Pubkey,
        fragment: &[u8],
    ) -> JsonClientResult<Signature> {
        let ix = instructions::set_value(
            &self.config.program_id,
            subject,
            &self.payer_pubkey(),
            fragment,
        )?;
        let signature = self.send_and_confirm(&[ix], &[]).await?;
        tracing::debug!(%subject, bytes = fragment.len(), %signature, "Fragment merged");
        Ok(signature)
    }

    /// Fetches `address` and checks it belongs to the program.
    pub(crate) async fn get_program_account(&self, address: &Pubkey) -> JsonClientResult<Account> {
        let account = self
            .retry_executor
            .execute(|| async {
                self.rpc
                    .get_account_with_commitment(address, self.config.commitment)
                    .await
                    .map_err(JsonClientError::from_rpc)
            })
            .await?
            .value
            .ok_or_else(|| JsonClientError::account_not_found(address))?;

        if account.owner != self.config.program_id {
            return Err(JsonClientError::WrongOwner {
                address: address.to_string(),
            });
        }
        Ok(account)
    }

    pub async fn get_metadata_impl(&self, subject: &Pubkey) -> JsonClientResult<MetadataRecord> {
        let account = self.get_program_account(&self.metadata_address(subject)).await?;
        Ok(MetadataRecord::decode(&account.data)?)
    }

    pub async fn get_document_impl(
        &self,
        subject: &Pubkey,
    ) -> JsonClientResult<document::JsonObject> {
        let account = self.get_program_account(subject).await?;
        document::read(&account.data)
            .ok_or(JsonClientError::Program(JsonMetadataError::NotInitialized))
    }
}
