//! API trait for the JSON metadata client.

pub mod authority;
pub mod document;

use async_trait::async_trait;
use json_metadata_core::{document::JsonObject, MetadataRecord};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};

use crate::errors::JsonClientError;

/// Operations on a subject's document and metadata record.
///
/// The configured payer signs every write and must be one of the record's
/// authorities for anything but Initialize.
#[async_trait]
pub trait JsonMetadataApi: Send + Sync {
    /// Initialize `subject` with the empty document. The payer becomes the only authority.
    async fn initialize(&self, subject: &Keypair) -> Result<Signature, JsonClientError>;

    /// Create `subject` with `capacity` bytes up front, then initialize it in the
    /// same transaction. Later writes that fit the capacity do not grow the account.
    async fn initialize_with_capacity(
        &self,
        subject: &Keypair,
        capacity: usize,
    ) -> Result<Signature, JsonClientError>;

    /// Merge `updates` into the stored document.
    ///
    /// Large updates are split by top-level key and sent as one transaction per
    /// fragment, in order. Returns one signature per fragment.
    async fn set_value(
        &self,
        subject: &Pubkey,
        updates: &JsonObject,
    ) -> Result<Vec<Signature>, JsonClientError>;

    /// Send one raw fragment as a single SetValue.
    async fn set_fragment(
        &self,
        subject: &Pubkey,
        fragment: &[u8],
    ) -> Result<Signature, JsonClientError>;

    async fn add_authority(
        &self,
        subject: &Pubkey,
        new_authority: &Pubkey,
    ) -> Result<Signature, JsonClientError>;

    /// Remove `authority`. The program refuses to remove the last one.
    async fn remove_authority(
        &self,
        subject: &Pubkey,
        authority: &Pubkey,
    ) -> Result<Signature, JsonClientError>;

    /// Fetch and decode the metadata record of `subject`.
    async fn get_metadata(&self, subject: &Pubkey) -> Result<MetadataRecord, JsonClientError>;

    /// Fetch and parse the document stored in `subject`.
    async fn get_document(&self, subject: &Pubkey) -> Result<JsonObject, JsonClientError>;
}
