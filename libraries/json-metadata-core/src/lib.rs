//! Account model for the on-chain JSON metadata program.
//!
//! Everything in this crate is runtime-agnostic: the program, the client and
//! the CLI all share the same document merge rules, record layout and
//! instruction encoding from here.

pub mod document;
pub mod error;
pub mod instruction;
pub mod record;

pub use error::{JsonMetadataError, JsonMetadataResult};
pub use record::{Authority, AuthoritySet, MetadataRecord};

/// First seed of the metadata account derivation.
pub const METADATA_SEED_PREFIX: &[u8] = b"JSON";
