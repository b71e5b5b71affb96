use json_metadata_core::{
    document,
    instruction::{AddAuthorityArgs, JsonMetadataInstruction, RemoveAuthorityArgs, SetValueArgs},
    record::MetadataRecord,
    JsonMetadataError, METADATA_SEED_PREFIX,
};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::account_utils::{
    assert_signer, assert_system_program, create_or_allocate_account, grow_account, is_uninitialized,
    shrink_account,
};
use crate::pda::assert_metadata_account;

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = JsonMetadataInstruction::unpack(instruction_data)?;
    match instruction {
        JsonMetadataInstruction::Initialize => {
            msg!("Instruction: Initialize");
            process_initialize(program_id, accounts)
        }
        JsonMetadataInstruction::SetValue(args) => {
            msg!("Instruction: SetValue");
            process_set_value(program_id, accounts, args)
        }
        JsonMetadataInstruction::AddAuthority(args) => {
            msg!("Instruction: AddAuthority");
            process_add_authority(program_id, accounts, args)
        }
        JsonMetadataInstruction::RemoveAuthority(args) => {
            msg!("Instruction: RemoveAuthority");
            process_remove_authority(program_id, accounts, args)
        }
    }
}

/// The four accounts every instruction takes, in wire order.
struct SubjectAccounts<'a, 'info> {
    subject: &'a AccountInfo<'info>,
    metadata: &'a AccountInfo<'info>,
    payer: &'a AccountInfo<'info>,
    system_program: &'a AccountInfo<'info>,
}

impl<'a, 'info> SubjectAccounts<'a, 'info> {
    fn parse(accounts: &'a [AccountInfo<'info>]) -> Result<Self, ProgramError> {
        let account_info_iter = &mut accounts.iter();
        let subject = next_account_info(account_info_iter)?;
        let metadata = next_account_info(account_info_iter)?;
        let payer = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;

        assert_signer(payer)?;
        assert_system_program(system_program)?;

        Ok(Self {
            subject,
            metadata,
            payer,
            system_program,
        })
    }

    /// Verifies an initialized pair and returns its record after the frozen
    /// and authority gates.
    fn load_for_update(&self, program_id: &Pubkey) -> Result<MetadataRecord, ProgramError> {
        let derived_bump = assert_metadata_account(program_id, self.subject.key, self.metadata.key)?;

        if self.metadata.owner != program_id
            || self.metadata.data_is_empty()
            || self.subject.owner != program_id
        {
            return Err(JsonMetadataError::NotInitialized.into());
        }

        let record = MetadataRecord::decode(&self.metadata.try_borrow_data()?)?;
        if record.bump != derived_bump {
            return Err(JsonMetadataError::AddressMismatch.into());
        }
        record.assert_mutable()?;
        record.assert_authority(&self.payer.key.to_bytes())?;
        Ok(record)
    }
}

fn process_initialize(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let ctx = SubjectAccounts::parse(accounts)?;
    let bump = assert_metadata_account(program_id, ctx.subject.key, ctx.metadata.key)?;

    if !is_uninitialized(ctx.metadata) {
        return Err(JsonMetadataError::AlreadyInitialized.into());
    }
    assert_signer(ctx.subject)?;

    let initial = document::write_initial();
    let encoded_record = MetadataRecord::new(bump, ctx.payer.key.to_bytes()).encode()?;

    if is_uninitialized(ctx.subject) {
        create_or_allocate_account(
            program_id,
            ctx.subject,
            ctx.payer,
            ctx.system_program,
            initial.len(),
            &[],
        )?;
    } else if ctx.subject.owner == program_id {
        // created empty by the client in an earlier instruction
        if !document::content(&ctx.subject.try_borrow_data()?).is_empty() {
            return Err(JsonMetadataError::AlreadyInitialized.into());
        }
        let target = document::required_capacity(ctx.subject.data_len(), initial.len());
        grow_account(ctx.subject, ctx.payer, ctx.system_program, target)?;
    } else {
        return Err(JsonMetadataError::AlreadyInitialized.into());
    }
    document::commit(&mut ctx.subject.try_borrow_mut_data()?, &initial)?;

    let bump_seed = [bump];
    let signer_seeds: &[&[u8]] = &[
        METADATA_SEED_PREFIX,
        program_id.as_ref(),
        ctx.subject.key.as_ref(),
        &bump_seed,
    ];
    create_or_allocate_account(
        program_id,
        ctx.metadata,
        ctx.payer,
        ctx.system_program,
        encoded_record.len(),
        &[signer_seeds],
    )?;
    ctx.metadata
        .try_borrow_mut_data()?
        .copy_from_slice(&encoded_record);

    msg!("Initialized metadata {} for {}", ctx.metadata.key, ctx.subject.key);
    Ok(())
}

fn process_set_value(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    args: SetValueArgs,
) -> ProgramResult {
    let ctx = SubjectAccounts::parse(accounts)?;
    ctx.load_for_update(program_id)?;

    let merged = document::merge(&ctx.subject.try_borrow_data()?, &args.fragment)?;
    let target = document::required_capacity(ctx.subject.data_len(), merged.len());
    grow_account(ctx.subject, ctx.payer, ctx.system_program, target)?;
    document::commit(&mut ctx.subject.try_borrow_mut_data()?, &merged)?;

    msg!("Document is {} bytes in a {} byte buffer", merged.len(), ctx.subject.data_len());
    Ok(())
}

fn process_add_authority(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    args: AddAuthorityArgs,
) -> ProgramResult {
    let ctx = SubjectAccounts::parse(accounts)?;
    let mut record = ctx.load_for_update(program_id)?;

    if !record.authorities.insert(args.new_authority) {
        return Err(JsonMetadataError::AuthorityAlreadyPresent.into());
    }
    let encoded = record.encode()?;
    grow_account(ctx.metadata, ctx.payer, ctx.system_program, encoded.len())?;
    write_record(ctx.metadata, &encoded)?;

    msg!("Record holds {} authorities", record.authorities.len());
    Ok(())
}

fn process_remove_authority(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    args: RemoveAuthorityArgs,
) -> ProgramResult {
    let ctx = SubjectAccounts::parse(accounts)?;
    let mut record = ctx.load_for_update(program_id)?;

    if !record.authorities.contains(&args.authority) {
        return Err(JsonMetadataError::AuthorityNotFound.into());
    }
    if record.authorities.len() == 1 {
        return Err(JsonMetadataError::LastAuthority.into());
    }
    record.authorities.remove(&args.authority);
    let encoded = record.encode()?;

    shrink_account(ctx.metadata, ctx.payer, encoded.len())?;
    write_record(ctx.metadata, &encoded)?;

    msg!("Record holds {} authorities", record.authorities.len());
    Ok(())
}

fn write_record(metadata: &AccountInfo, encoded: &[u8]) -> ProgramResult {
    let mut data = metadata.try_borrow_mut_data()?;
    if data.len() < encoded.len() {
        return Err(JsonMetadataError::CapacityGrowthFailed.into());
    }
    let (head, tail) = data.split_at_mut(encoded.len());
    head.copy_from_slice(encoded);
    tail.fill(0);
    Ok(())
}
