//! Error types

use num_derive::FromPrimitive;
use thiserror::Error;

/// Errors returned by the JSON metadata program.
///
/// Discriminants are the `ProgramError::Custom` codes seen by clients and must
/// never be renumbered.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq, FromPrimitive)]
pub enum JsonMetadataError {
    /// 0 - Metadata (or subject) account already initialized
    #[error("The account has already been initialized")]
    AlreadyInitialized = 0,
    /// 1 - SetValue or authority change before Initialize
    #[error("The account has not yet been initialized")]
    NotInitialized = 1,
    /// 2 - Metadata address does not match the derivation from the subject
    #[error("The metadata account address does not match its derivation")]
    AddressMismatch = 2,
    /// 3 - Account 3 is not the system program
    #[error("The system program account is invalid")]
    InvalidSystemProgram = 3,
    /// 4 - Fragment is not valid JSON or not a JSON object
    #[error("The JSON fragment is malformed or not an object")]
    MalformedFragment = 4,
    /// 5 - Record or document could not be serialized
    #[error("Failed to serialize account data")]
    SerializationError = 5,
    /// 6 - Signer is not one of the record's authorities
    #[error("The signer does not have authority to perform this action")]
    Unauthorized = 6,
    /// 7 - Record is immutable
    #[error("The document is frozen")]
    Frozen = 7,
    /// 8 - Metadata account bytes are truncated or inconsistent
    #[error("The metadata record is malformed")]
    MalformedRecord = 8,
    /// 9 - Account storage could not be grown
    #[error("Account capacity could not be grown")]
    CapacityGrowthFailed = 9,
    /// 10 - Unknown tag or bad payload
    #[error("Invalid instruction data")]
    InvalidInstruction = 10,
    /// 11 - AddAuthority with an identity already in the set
    #[error("The authority is already present")]
    AuthorityAlreadyPresent = 11,
    /// 12 - RemoveAuthority with an identity not in the set
    #[error("The authority was not found")]
    AuthorityNotFound = 12,
    /// 13 - RemoveAuthority would leave the set empty
    #[error("Cannot remove the last authority")]
    LastAuthority = 13,
}

impl From<JsonMetadataError> for solana_program_error::ProgramError {
    fn from(e: JsonMetadataError) -> Self {
        solana_program_error::ProgramError::Custom(e as u32)
    }
}

impl JsonMetadataError {
    /// Maps a `ProgramError::Custom` code back to the error, if it is one of ours.
    pub fn from_code(code: u32) -> Option<Self> {
        num_traits::FromPrimitive::from_u32(code)
    }
}

pub type JsonMetadataResult<T> = Result<T, JsonMetadataError>;
