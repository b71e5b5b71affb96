pub mod authority;
pub mod derive;
pub mod initialize;
pub mod set_value;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use json_metadata_client::{JsonClientConfigBuilder, JsonMetadataClient};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};

/// Options shared by every subcommand.
pub struct GlobalOpts {
    pub rpc_url: String,
    pub keypair: Option<PathBuf>,
    pub program_id: Option<Pubkey>,
}

impl GlobalOpts {
    pub fn program_id(&self) -> Pubkey {
        self.program_id.unwrap_or(json_metadata::ID)
    }

    pub fn client(&self, max_fragment_len: Option<usize>) -> Result<JsonMetadataClient> {
        let mut builder = JsonClientConfigBuilder::new()
            .rpc_url(&self.rpc_url)
            .payer(load_keypair(self.keypair.as_deref())?)
            .program_id(self.program_id());
        if let Some(len) = max_fragment_len {
            builder = builder.max_fragment_len(len);
        }
        let config = builder.build().context("Invalid client configuration")?;
        tracing::debug!(
            rpc_url = %config.rpc_url,
            program_id = %config.program_id,
            max_fragment_len = config.max_fragment_len,
            "Client configured"
        );
        Ok(JsonMetadataClient::with_config(config))
    }
}

pub fn read_keypair(path: &Path) -> Result<Keypair> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
    read_keypair_file(&expanded).map_err(|e| anyhow!("Failed to read keypair from {}: {}", expanded, e))
}

/// Loads the payer from `path`, or from the Solana CLI default location.
pub fn load_keypair(path: Option<&Path>) -> Result<Keypair> {
    match path {
        Some(path) => read_keypair(path),
        None => {
            let default_path = dirs::home_dir()
                .map(|h| h.join(".config/solana/id.json"))
                .context("Could not determine home directory")?;
            read_keypair_file(&default_path).map_err(|e| {
                anyhow!(
                    "Failed to read keypair from {:?}. Use --keypair to specify a path: {}",
                    default_path,
                    e
                )
            })
        }
    }
}
