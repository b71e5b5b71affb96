use anyhow::{Context, Result};
use clap::Args;
use json_metadata_client::JsonMetadataApi;
use solana_sdk::pubkey::Pubkey;

use super::GlobalOpts;

#[derive(Args)]
pub struct AddAuthorityArgs {
    /// Subject account address
    subject: Pubkey,

    /// Key to grant authority to
    authority: Pubkey,
}

#[derive(Args)]
pub struct RemoveAuthorityArgs {
    /// Subject account address
    subject: Pubkey,

    /// Key to revoke
    authority: Pubkey,
}

pub async fn execute_add(opts: &GlobalOpts, args: AddAuthorityArgs) -> Result<()> {
    let client = opts.client(None)?;
    let signature = client
        .add_authority(&args.subject, &args.authority)
        .await
        .context("AddAuthority failed")?;

    println!("Added {} as authority of {}", args.authority, args.subject);
    println!("Signature: {}", signature);
    Ok(())
}

pub async fn execute_remove(opts: &GlobalOpts, args: RemoveAuthorityArgs) -> Result<()> {
    let client = opts.client(None)?;
    let signature = client
        .remove_authority(&args.subject, &args.authority)
        .await
        .context("RemoveAuthority failed")?;

    println!("Removed {} as authority of {}", args.authority, args.subject);
    println!("Signature: {}", signature);
    Ok(())
}
