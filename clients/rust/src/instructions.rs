use json_metadata::pda::find_metadata_account_with_program_id;
use json_metadata_core::instruction::{
    AddAuthorityArgs, JsonMetadataInstruction, RemoveAuthorityArgs,
};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction, system_program,
};

use crate::errors::JsonClientResult;

fn subject_accounts(
    program_id: &Pubkey,
    subject: &Pubkey,
    payer: &Pubkey,
    subject_signs: bool,
) -> Vec<AccountMeta> {
    let (metadata, _) = find_metadata_account_with_program_id(program_id, subject);
    vec![
        AccountMeta::new(*subject, subject_signs),
        AccountMeta::new(metadata, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ]
}

fn build(
    program_id: &Pubkey,
    accounts: Vec<AccountMeta>,
    instruction: &JsonMetadataInstruction,
) -> JsonClientResult<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction.pack()?,
    })
}

/// Initialize `subject`. The subject keypair must sign the transaction. The
/// payer becomes the first authority.
pub fn initialize(
    program_id: &Pubkey,
    subject: &Pubkey,
    payer: &Pubkey,
) -> JsonClientResult<Instruction> {
    build(
        program_id,
        subject_accounts(program_id, subject, payer, true),
        &JsonMetadataInstruction::Initialize,
    )
}

/// Creates `subject` as an empty program owned account of `space` bytes, so
/// Initialize adopts it instead of creating it. Useful when the expected document
/// size is known up front.
pub fn create_subject_account(
    program_id: &Pubkey,
    subject: &Pubkey,
    payer: &Pubkey,
    lamports: u64,
    space: u64,
) -> Instruction {
    system_instruction::create_account(payer, subject, lamports, space, program_id)
}

pub fn set_value(
    program_id: &Pubkey,
    subject: &Pubkey,
    payer: &Pubkey,
    fragment: impl Into<Vec<u8>>,
) -> JsonClientResult<Instruction> {
    build(
        program_id,
        subject_accounts(program_id, subject, payer, false),
        &JsonMetadataInstruction::set_value(fragment),
    )
}

pub fn add_authority(
    program_id: &Pubkey,
    subject: &Pubkey,
    payer: &Pubkey,
    new_authority: &Pubkey,
) -> JsonClientResult<Instruction> {
    build(
        program_id,
        subject_accounts(program_id, subject, payer, false),
        &JsonMetadataInstruction::AddAuthority(AddAuthorityArgs {
            new_authority: new_authority.to_bytes(),
        }),
    )
}

pub fn remove_authority(
    program_id: &Pubkey,
    subject: &Pubkey,
    payer: &Pubkey,
    authority: &Pubkey,
) -> JsonClientResult<Instruction> {
    build(
        program_id,
        subject_accounts(program_id, subject, payer, false),
        &JsonMetadataInstruction::RemoveAuthority(RemoveAuthorityArgs {
            authority: authority.to_bytes(),
        }),
    )
}
