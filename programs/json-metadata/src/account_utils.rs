use json_metadata_core::JsonMetadataError;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};

/// Largest growth the runtime allows for one account in one instruction.
pub const MAX_PERMITTED_DATA_INCREASE: usize = 10_240;

/// Largest data length the runtime allows for an account.
pub const MAX_PERMITTED_DATA_LENGTH: usize = 10 * 1024 * 1024;

pub fn assert_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

pub fn assert_system_program(account: &AccountInfo) -> Result<(), JsonMetadataError> {
    if account.key != &system_program::ID {
        return Err(JsonMetadataError::InvalidSystemProgram);
    }
    Ok(())
}

/// System owned and holding no data.
pub fn is_uninitialized(account: &AccountInfo) -> bool {
    account.owner == &system_program::ID && account.data_is_empty()
}

/// Lamports that must be added for `account` to stay rent exempt at `target_size`.
pub fn rent_shortfall(rent: &Rent, account: &AccountInfo, target_size: usize) -> u64 {
    rent.minimum_balance(target_size).saturating_sub(account.lamports())
}

/// Checks that `payer` can send `amount` and still be rent exempt afterwards.
/// Draining the payer to exactly zero is allowed.
pub fn assert_payer_can_fund(
    rent: &Rent,
    payer: &AccountInfo,
    amount: u64,
) -> Result<(), JsonMetadataError> {
    let remaining = match payer.lamports().checked_sub(amount) {
        Some(remaining) => remaining,
        None => {
            msg!("Payer holds {} lamports, needs {}", payer.lamports(), amount);
            return Err(JsonMetadataError::CapacityGrowthFailed);
        }
    };
    let payer_minimum = rent.minimum_balance(payer.data_len());
    if remaining != 0 && remaining < payer_minimum {
        msg!("Payer would keep {} lamports, below its rent minimum {}", remaining, payer_minimum);
        return Err(JsonMetadataError::CapacityGrowthFailed);
    }
    Ok(())
}

/// Creates `account` owned by `program_id` with `space` bytes, funded by `payer`.
///
/// Accounts that already hold lamports cannot go through `create_account`, so
/// they are topped up, allocated and assigned instead. `signer_seeds` is empty
/// when `account` signs the transaction itself.
pub fn create_or_allocate_account<'a>(
    program_id: &Pubkey,
    account: &AccountInfo<'a>,
    payer: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    space: usize,
    signer_seeds: &[&[&[u8]]],
) -> ProgramResult {
    let rent = Rent::get()?;

    if account.lamports() == 0 {
        assert_payer_can_fund(&rent, payer, rent.minimum_balance(space))?;
        invoke_signed(
            &system_instruction::create_account(
                payer.key,
                account.key,
                rent.minimum_balance(space),
                space as u64,
                program_id,
            ),
            &[payer.clone(), account.clone(), system_program.clone()],
            signer_seeds,
        )?;
    } else {
        let top_up = rent_shortfall(&rent, account, space);
        if top_up > 0 {
            assert_payer_can_fund(&rent, payer, top_up)?;
            invoke(
                &system_instruction::transfer(payer.key, account.key, top_up),
                &[payer.clone(), account.clone(), system_program.clone()],
            )?;
        }
        invoke_signed(
            &system_instruction::allocate(account.key, space as u64),
            &[account.clone(), system_program.clone()],
            signer_seeds,
        )?;
        invoke_signed(
            &system_instruction::assign(account.key, program_id),
            &[account.clone(), system_program.clone()],
            signer_seeds,
        )?;
    }
    Ok(())
}

/// Checks that `account` can be grown to `target_size` with `payer`'s funds.
///
/// Runs before anything is written so a rejected growth leaves both accounts
/// untouched.
pub fn check_growth(
    rent: &Rent,
    account: &AccountInfo,
    payer: &AccountInfo,
    target_size: usize,
) -> Result<u64, JsonMetadataError> {
    let current_size = account.data_len();
    if target_size <= current_size {
        return Ok(0);
    }
    if target_size - current_size > MAX_PERMITTED_DATA_INCREASE
        || target_size > MAX_PERMITTED_DATA_LENGTH
    {
        msg!("Growth from {} to {} exceeds runtime limits", current_size, target_size);
        return Err(JsonMetadataError::CapacityGrowthFailed);
    }
    let shortfall = rent_shortfall(rent, account, target_size);
    assert_payer_can_fund(rent, payer, shortfall)?;
    Ok(shortfall)
}

/// Grows a program owned `account` to `target_size`, topping up rent from `payer`.
/// Never shrinks.
pub fn grow_account<'a>(
    account: &AccountInfo<'a>,
    payer: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    target_size: usize,
) -> ProgramResult {
    let rent = Rent::get()?;
    let shortfall = check_growth(&rent, account, payer, target_size)?;
    let current_size = account.data_len();
    if target_size <= current_size {
        return Ok(());
    }

    if shortfall > 0 {
        invoke(
            &system_instruction::transfer(payer.key, account.key, shortfall),
            &[payer.clone(), account.clone(), system_program.clone()],
        )
        .map_err(|_| JsonMetadataError::CapacityGrowthFailed)?;
    }

    account
        .realloc(target_size, false)
        .map_err(|_| JsonMetadataError::CapacityGrowthFailed)?;
    msg!("Grew {} from {} to {} bytes", account.key, current_size, target_size);
    Ok(())
}

/// Shrinks a program owned `account` to `target_size` and refunds the rent it no
/// longer needs to `payer`.
pub fn shrink_account<'a>(
    account: &AccountInfo<'a>,
    payer: &AccountInfo<'a>,
    target_size: usize,
) -> ProgramResult {
    if target_size >= account.data_len() {
        return Ok(());
    }
    account.realloc(target_size, false)?;

    let rent = Rent::get()?;
    let excess = account
        .lamports()
        .saturating_sub(rent.minimum_balance(target_size));
    if excess > 0 {
        **account.try_borrow_mut_lamports()? -= excess;
        **payer.try_borrow_mut_lamports()? += excess;
    }
    Ok(())
}
