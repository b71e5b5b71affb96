use anyhow::Result;
use clap::Args;
use json_metadata::pda::find_metadata_account_with_program_id;
use solana_sdk::pubkey::Pubkey;

use super::GlobalOpts;

#[derive(Args)]
pub struct DeriveArgs {
    /// Subject account address
    subject: Pubkey,
}

pub fn execute(opts: &GlobalOpts, args: DeriveArgs) -> Result<()> {
    let program_id = opts.program_id();
    let (metadata, bump) = find_metadata_account_with_program_id(&program_id, &args.subject);

    println!("Program:  {}", program_id);
    println!("Subject:  {}", args.subject);
    println!("Metadata: {}", metadata);
    println!("Bump:     {}", bump);
    Ok(())
}
