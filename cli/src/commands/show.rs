use anyhow::{Context, Result};
use clap::Args;
use json_metadata_client::JsonMetadataApi;
use solana_sdk::pubkey::Pubkey;

use super::GlobalOpts;

#[derive(Args)]
pub struct ShowArgs {
    /// Subject account address
    subject: Pubkey,

    /// Print only the document as compact JSON
    #[arg(long)]
    raw: bool,
}

pub async fn execute(opts: &GlobalOpts, args: ShowArgs) -> Result<()> {
    let client = opts.client(None)?;
    let document = client
        .get_document(&args.subject)
        .await
        .context("Failed to read document")?;

    if args.raw {
        println!("{}", serde_json::to_string(&document)?);
        return Ok(());
    }

    let record = client
        .get_metadata(&args.subject)
        .await
        .context("Failed to read metadata record")?;

    println!("Subject:  {}", args.subject);
    println!("Metadata: {}", client.metadata_address(&args.subject));
    println!("Bump:     {}", record.bump);
    println!("Mutable:  {}", record.mutable);
    println!("Authorities:");
    for authority in record.authorities.iter() {
        println!("  {}", Pubkey::new_from_array(*authority));
    }
    println!("Document:");
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
