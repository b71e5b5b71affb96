//! Configuration types for the JsonMetadataClient.

use solana_sdk::{
    commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Keypair, signer::Signer,
};
use std::sync::Arc;

use crate::constants::{DEFAULT_MAX_FRAGMENT_LEN, JSON_METADATA_PROGRAM_ID};

/// Retry configuration for failed operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds
    pub initial_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
        }
    }
}

#[derive(Clone)]
pub struct JsonClientConfig {
    pub rpc_url: String,
    /// Pays fees and rent, and signs as the authority
    pub payer: Arc<Keypair>,
    pub program_id: Pubkey,
    pub commitment: CommitmentConfig,
    pub retry: RetryConfig,
    /// Upper bound for one SetValue fragment in bytes
    pub max_fragment_len: usize,
}

impl std::fmt::Debug for JsonClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonClientConfig")
            .field("rpc_url", &self.rpc_url)
            .field("payer", &self.payer.pubkey())
            .field("program_id", &self.program_id)
            .field("commitment", &self.commitment)
            .field("retry", &self.retry)
            .field("max_fragment_len", &self.max_fragment_len)
            .finish()
    }
}

#[derive(Default)]
pub struct JsonClientConfigBuilder {
    rpc_url: Option<String>,
    payer: Option<Arc<Keypair>>,
    program_id: Option<Pubkey>,
    commitment: Option<CommitmentConfig>,
    retry: Option<RetryConfig>,
    max_fragment_len: Option<usize>,
}

impl JsonClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    pub fn payer(mut self, keypair: Keypair) -> Self {
        self.payer = Some(Arc::new(keypair));
        self
    }

    /// Use a program deployed somewhere other than the default address.
    pub fn program_id(mut self, id: Pubkey) -> Self {
        self.program_id = Some(id);
        self
    }

    pub fn commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = Some(commitment);
        self
    }

    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    pub fn max_fragment_len(mut self, len: usize) -> Self {
        self.max_fragment_len = Some(len);
        self
    }

    /// Build the configuration.
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<JsonClientConfig, ConfigError> {
        let rpc_url = self.rpc_url.ok_or(ConfigError::MissingField("rpc_url"))?;
        let payer = self.payer.ok_or(ConfigError::MissingField("payer"))?;

        let max_fragment_len = self.max_fragment_len.unwrap_or(DEFAULT_MAX_FRAGMENT_LEN);
        // smallest useful fragment is `{"":0}`
        if max_fragment_len < 8 {
            return Err(ConfigError::Invalid(format!(
                "max_fragment_len {} is too small",
                max_fragment_len
            )));
        }

        Ok(JsonClientConfig {
            rpc_url,
            payer,
            program_id: self.program_id.unwrap_or(JSON_METADATA_PROGRAM_ID),
            commitment: self.commitment.unwrap_or_else(CommitmentConfig::confirmed),
            retry: self.retry.unwrap_or_default(),
            max_fragment_len,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),
}
