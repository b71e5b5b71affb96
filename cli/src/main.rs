use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use json_metadata_client::constants::DEFAULT_RPC_URL;
use solana_sdk::pubkey::Pubkey;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    authority::{AddAuthorityArgs, RemoveAuthorityArgs},
    derive::DeriveArgs,
    initialize::InitializeArgs,
    set_value::SetValueArgs,
    show::ShowArgs,
    GlobalOpts,
};

#[derive(Parser)]
#[command(name = "json-metadata-cli")]
#[command(about = "CLI tool for building on-chain JSON metadata documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Solana RPC URL
    #[arg(long, default_value = DEFAULT_RPC_URL, global = true)]
    rpc_url: String,

    /// Path to payer keypair file. The payer signs as the authority.
    #[arg(long, short = 'k', global = true)]
    keypair: Option<PathBuf>,

    /// Program address, when not using the default deployment
    #[arg(long, global = true)]
    program_id: Option<Pubkey>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metadata account address of a subject
    Derive(DeriveArgs),

    /// Create a subject account holding an empty document
    Initialize(InitializeArgs),

    /// Merge a JSON object into a subject's document
    SetValue(SetValueArgs),

    /// Allow another key to modify a document
    AddAuthority(AddAuthorityArgs),

    /// Revoke a key's authority over a document
    RemoveAuthority(RemoveAuthorityArgs),

    /// Print a subject's metadata record and document
    Show(ShowArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = GlobalOpts {
        rpc_url: cli.rpc_url,
        keypair: cli.keypair,
        program_id: cli.program_id,
    };

    match cli.command {
        Commands::Derive(args) => commands::derive::execute(&opts, args),
        Commands::Initialize(args) => commands::initialize::execute(&opts, args).await,
        Commands::SetValue(args) => commands::set_value::execute(&opts, args).await,
        Commands::AddAuthority(args) => commands::authority::execute_add(&opts, args).await,
        Commands::RemoveAuthority(args) => commands::authority::execute_remove(&opts, args).await,
        Commands::Show(args) => commands::show::execute(&opts, args).await,
    }
}
