//! Example: build a metadata document in several steps
//!
//! Creates a fresh subject, writes a token style metadata document to it a few
//! keys at a time and prints the result.
//!
//! Usage:
//!   cargo run --example build_document -- <RPC_URL> <PAYER_KEYPAIR_PATH>
//!
//! Example:
//!   cargo run --example build_document -- http://127.0.0.1:8899 ~/.config/solana/id.json

use json_metadata_client::{fragments::parse_object, JsonMetadataApi, JsonMetadataClient};
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <RPC_URL> <PAYER_KEYPAIR_PATH>", args[0]);
        std::process::exit(1);
    }

    let payer = read_keypair_file(&args[2])
        .map_err(|e| anyhow::anyhow!("Failed to read keypair {}: {}", args[2], e))?;
    let client = JsonMetadataClient::new(&args[1], &payer.to_bytes())?;

    let subject = Keypair::new();
    client.initialize(&subject).await?;
    println!("Initialized {}", subject.pubkey());
    println!("  Metadata: {}", client.metadata_address(&subject.pubkey()));

    let steps = [
        r#"{"name":"Bread On-Chain","symbol":"BRD"}"#,
        r#"{"description":"A loaf of bread, stored one slice at a time"}"#,
        r#"{"attributes":[{"trait_type":"crust","value":"sourdough"}]}"#,
        r#"{"symbol":"LOAF"}"#,
    ];
    for step in steps {
        let updates = parse_object(step)?;
        let signatures = client.set_value(&subject.pubkey(), &updates).await?;
        println!("Merged {} in {} transaction(s)", step, signatures.len());
    }

    let document = client.get_document(&subject.pubkey()).await?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
