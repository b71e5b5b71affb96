//! Authority set changes.

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{client::JsonMetadataClient, errors::JsonClientResult, instructions};

impl JsonMetadataClient {
    pub async fn add_authority_impl(
        &self,
        subject: &Pubkey,
        new_authority: &Pubkey,
    ) -> JsonClientResult<Signature> {
        let ix = instructions::add_authority(
            &self.config.program_id,
            subject,
            &self.payer_pubkey(),
            new_authority,
        )?;
        let signature = self.send_and_confirm(&[ix], &[]).await?;
        tracing::info!(%subject, authority = %new_authority, %signature, "Authority added");
        Ok(signature)
    }

    pub async fn remove_authority_impl(
        &self,
        subject: &Pubkey,
        authority: &Pubkey,
    ) -> JsonClientResult<Signature> {
        let ix = instructions::remove_authority(
            &self.config.program_id,
            subject,
            &self.payer_pubkey(),
            authority,
        )?;
        let signature = self.send_and_confirm(&[ix], &[]).await?;
        tracing::info!(%subject, %authority, %signature, "Authority removed");
        Ok(signature)
    }
}
