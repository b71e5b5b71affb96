//! Metadata account derivation.
//!
//! Seeds: `["JSON", program_id, subject]`. The program id is part of the seeds
//! as well as the deriving program, which keeps addresses compatible with
//! accounts created by earlier clients.

use json_metadata_core::{JsonMetadataError, METADATA_SEED_PREFIX};
use solana_program::pubkey::Pubkey;

/// Derives the metadata account of `subject` for the deployed program.
pub fn find_metadata_account(subject: &Pubkey) -> (Pubkey, u8) {
    find_metadata_account_with_program_id(&crate::ID, subject)
}

pub fn find_metadata_account_with_program_id(
    program_id: &Pubkey,
    subject: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_SEED_PREFIX, program_id.as_ref(), subject.as_ref()],
        program_id,
    )
}

/// Recomputes the metadata address of `subject` and checks it against `metadata`.
/// Returns the bump on success.
pub fn assert_metadata_account(
    program_id: &Pubkey,
    subject: &Pubkey,
    metadata: &Pubkey,
) -> Result<u8, JsonMetadataError> {
    let (expected, bump) = find_metadata_account_with_program_id(program_id, subject);
    if expected != *metadata {
        return Err(JsonMetadataError::AddressMismatch);
    }
    Ok(bump)
}
