use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use json_metadata_client::{fragments::parse_object, JsonMetadataApi};
use solana_sdk::pubkey::Pubkey;

use super::GlobalOpts;

#[derive(Args)]
pub struct SetValueArgs {
    /// Subject account address
    subject: Pubkey,

    /// JSON object to merge, inline
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    json: Option<String>,

    /// File holding the JSON object to merge
    #[arg(long)]
    file: Option<PathBuf>,

    /// Largest fragment sent per transaction, in bytes
    #[arg(long)]
    max_fragment_len: Option<usize>,
}

pub async fn execute(opts: &GlobalOpts, args: SetValueArgs) -> Result<()> {
    let text = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        (None, None) => bail!("Pass the update with --json or --file"),
    };
    let updates = parse_object(&text).context("Invalid update")?;

    let client = opts.client(args.max_fragment_len)?;
    let signatures = client
        .set_value(&args.subject, &updates)
        .await
        .context("SetValue failed")?;

    println!(
        "Merged {} keys into {} in {} transaction(s)",
        updates.len(),
        args.subject,
        signatures.len()
    );
    for signature in signatures {
        println!("  {}", signature);
    }
    Ok(())
}
