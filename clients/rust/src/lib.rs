//! JSON Metadata Client
//!
//! A Rust client for building JSON documents in on-chain subject accounts.
//!
//! # Features
//!
//! - **Instruction builders** for every program instruction
//! - **Fragment splitting** so large documents are written across several SetValue calls
//! - **Retry Logic**: Automatic retry with exponential backoff for transient failures
//! - **Readers** that decode the metadata record and parse the stored document
//!
//! # Example
//!
//! ```ignore
//! use json_metadata_client::{JsonMetadataApi, JsonMetadataClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JsonMetadataClient::new("http://127.0.0.1:8899", &payer.to_bytes())?;
//!
//!     let subject = Keypair::new();
//!     client.initialize(&subject).await?;
//!     client
//!         .set_value(&subject.pubkey(), json!({"name": "Bread On-Chain"}).as_object().unwrap())
//!         .await?;
//!
//!     let document = client.get_document(&subject.pubkey()).await?;
//!     println!("{}", serde_json::to_string_pretty(&document)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fragments;
pub mod instructions;
pub mod rpc;

pub use api::JsonMetadataApi;
pub use client::JsonMetadataClient;
pub use config::{ConfigError, JsonClientConfig, JsonClientConfigBuilder, RetryConfig};
pub use errors::{ErrorCategory, JsonClientError, JsonClientResult};
pub use json_metadata_core::{document::JsonObject, MetadataRecord};
