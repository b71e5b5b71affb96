//! Error types for the JSON metadata client.
//!
//! Program failures are decoded back into [`JsonMetadataError`] so callers can
//! match on them instead of on raw custom codes.

use json_metadata_core::JsonMetadataError;
use solana_client::client_error::ClientErrorKind;
use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum JsonClientError {
    // Network Errors
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("Connection timeout")]
    ConnectionTimeout,

    // Transaction Errors
    #[error("Blockhash expired before the transaction landed")]
    BlockhashExpired,

    #[error("Transaction rejected: {reason}")]
    TransactionRejected { reason: String },

    #[error("Transaction already processed")]
    AlreadyProcessed,

    // Program Errors
    #[error("Program error: {0}")]
    Program(#[from] JsonMetadataError),

    // Document Errors
    #[error("Value of key {key:?} serializes to {size} bytes, max fragment is {max_size}")]
    FragmentTooLarge {
        key: String,
        size: usize,
        max_size: usize,
    },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    // Account Errors
    #[error("Account not found: {address}")]
    AccountNotFound { address: String },

    #[error("Account {address} is not owned by the metadata program")]
    WrongOwner { address: String },

    // Configuration Errors
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

fn is_timeout(kind: &ClientErrorKind) -> bool {
    match kind {
        ClientErrorKind::Reqwest(e) => e.is_timeout(),
        ClientErrorKind::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
        _ => false,
    }
}

impl JsonClientError {
    /// Decodes RPC failures that carry a transaction error, so program errors
    /// are never mistaken for transient network failures.
    pub fn from_rpc(error: solana_client::client_error::ClientError) -> Self {
        match error.get_transaction_error() {
            Some(tx_error) => Self::from_transaction_error(tx_error),
            None if is_timeout(error.kind()) => Self::ConnectionTimeout,
            None => Self::Rpc(error),
        }
    }

    pub fn from_transaction_error(error: TransactionError) -> Self {
        match error {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                match JsonMetadataError::from_code(code) {
                    Some(program_error) => Self::Program(program_error),
                    None => Self::TransactionRejected {
                        reason: format!("custom program error {code:#x}"),
                    },
                }
            }
            TransactionError::AlreadyProcessed => Self::AlreadyProcessed,
            TransactionError::BlockhashNotFound => Self::BlockhashExpired,
            other => Self::TransactionRejected {
                reason: other.to_string(),
            },
        }
    }

    /// The decoded program error, if this failure came from the program.
    pub fn program_error(&self) -> Option<JsonMetadataError> {
        match self {
            Self::Program(e) => Some(*e),
            _ => None,
        }
    }

    /// Retryable errors are transient network conditions that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Rpc(_) | Self::ConnectionTimeout | Self::BlockhashExpired
        )
    }

    pub fn retry_hint_ms(&self) -> Option<u64> {
        match self {
            Self::ConnectionTimeout => Some(1000),
            Self::BlockhashExpired => Some(400),
            _ => None,
        }
    }

    /// Categorize the error for logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Rpc(_) | Self::ConnectionTimeout => ErrorCategory::Network,

            Self::BlockhashExpired | Self::TransactionRejected { .. } | Self::AlreadyProcessed => {
                ErrorCategory::Transaction
            }

            Self::Program(_) => ErrorCategory::Program,

            Self::FragmentTooLarge { .. } | Self::InvalidJson(_) => ErrorCategory::Document,

            Self::AccountNotFound { .. } | Self::WrongOwner { .. } => ErrorCategory::Account,

            Self::Config(_) => ErrorCategory::Config,

            Self::InvalidInput(_) => ErrorCategory::Validation,

            Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    pub fn account_not_found(address: impl ToString) -> Self {
        Self::AccountNotFound {
            address: address.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// RPC transport and timeouts
    Network,
    /// Transaction rejected before or during execution
    Transaction,
    /// The program returned an error
    Program,
    /// Document encoding and fragment sizing
    Document,
    /// Missing or foreign accounts
    Account,
    Config,
    Validation,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Transaction => write!(f, "transaction"),
            ErrorCategory::Program => write!(f, "program"),
            ErrorCategory::Document => write!(f, "document"),
            ErrorCategory::Account => write!(f, "account"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

pub type JsonClientResult<T> = Result<T, JsonClientError>;
