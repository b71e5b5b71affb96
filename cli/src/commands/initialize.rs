use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use json_metadata_client::JsonMetadataApi;
use solana_sdk::signature::{Keypair, Signer};

use super::{read_keypair, GlobalOpts};

#[derive(Args)]
pub struct InitializeArgs {
    /// Keypair of the subject account. A new one is generated when omitted.
    #[arg(long)]
    subject_keypair: Option<PathBuf>,

    /// Where to save a generated subject keypair
    #[arg(long, default_value = "./subject.json")]
    output: PathBuf,

    /// Allocate this many bytes for the document up front
    #[arg(long)]
    capacity: Option<usize>,
}

pub async fn execute(opts: &GlobalOpts, args: InitializeArgs) -> Result<()> {
    let subject = match &args.subject_keypair {
        Some(path) => read_keypair(path)?,
        None => generate_subject(&args.output)?,
    };
    let client = opts.client(None)?;

    let signature = match args.capacity {
        Some(0) => bail!("--capacity must be greater than zero"),
        Some(capacity) => client.initialize_with_capacity(&subject, capacity).await,
        None => client.initialize(&subject).await,
    }
    .context("Initialize failed")?;

    println!("Subject:   {}", subject.pubkey());
    println!("Metadata:  {}", client.metadata_address(&subject.pubkey()));
    println!("Authority: {}", client.payer_pubkey());
    println!("Signature: {}", signature);
    Ok(())
}

fn generate_subject(output: &PathBuf) -> Result<Keypair> {
    if output.exists() {
        bail!(
            "{:?} already exists. Pass it with --subject-keypair or choose another --output",
            output
        );
    }
    let keypair = Keypair::new();
    // Solana CLI compatible format
    let json = serde_json::to_string(&keypair.to_bytes().to_vec())?;
    fs::write(output, json).with_context(|| format!("Failed to write keypair to {:?}", output))?;
    println!("Generated subject keypair, saved to {:?}", output);
    Ok(keypair)
}
