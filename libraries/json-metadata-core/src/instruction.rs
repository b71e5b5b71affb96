//! Instruction encoding.
//!
//! `[tag:1][borsh payload]`. Tags 1 and 3 belonged to Close and AppendValue in
//! earlier deployments and stay reserved so existing clients never hit a
//! different instruction by accident.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::{JsonMetadataError, JsonMetadataResult};
use crate::record::Authority;

pub const JSON_METADATA_INSTRUCTION_INITIALIZE: u8 = 0;
pub const JSON_METADATA_INSTRUCTION_SET_VALUE: u8 = 2;
pub const JSON_METADATA_INSTRUCTION_ADD_AUTHORITY: u8 = 4;
pub const JSON_METADATA_INSTRUCTION_REMOVE_AUTHORITY: u8 = 5;

/// SetValue payload. Same wire format as a borsh `String`: u32 LE length then bytes.
#[derive(BorshSerialize, BorshDeserialize, PartialEq, Debug, Clone)]
pub struct SetValueArgs {
    pub fragment: Vec<u8>,
}

#[derive(BorshSerialize, BorshDeserialize, PartialEq, Debug, Clone)]
pub struct AddAuthorityArgs {
    pub new_authority: Authority,
}

#[derive(BorshSerialize, BorshDeserialize, PartialEq, Debug, Clone)]
pub struct RemoveAuthorityArgs {
    pub authority: Authority,
}

#[derive(PartialEq, Debug, Clone)]
pub enum JsonMetadataInstruction {
    /// Accounts:
    ///   0. subject         [writable, signer]
    ///   1. metadata        [writable]  PDA: ["JSON", program_id, subject]
    ///   2. payer           [writable, signer]  becomes the first authority
    ///   3. system_program
    Initialize,
    /// Accounts: same as Initialize, subject need not sign. The payer must be an
    /// authority and funds growth.
    SetValue(SetValueArgs),
    /// Accounts: same as Initialize.
    AddAuthority(AddAuthorityArgs),
    /// Accounts: same as Initialize. Freed rent goes back to the payer.
    RemoveAuthority(RemoveAuthorityArgs),
}

fn decode_payload<T: BorshDeserialize>(payload: &[u8]) -> JsonMetadataResult<T> {
    T::try_from_slice(payload).map_err(|_| JsonMetadataError::InvalidInstruction)
}

impl JsonMetadataInstruction {
    pub fn unpack(instruction_data: &[u8]) -> JsonMetadataResult<Self> {
        let (&tag, payload) = instruction_data
            .split_first()
            .ok_or(JsonMetadataError::InvalidInstruction)?;
        match tag {
            JSON_METADATA_INSTRUCTION_INITIALIZE => {
                if !payload.is_empty() {
                    return Err(JsonMetadataError::InvalidInstruction);
                }
                Ok(Self::Initialize)
            }
            JSON_METADATA_INSTRUCTION_SET_VALUE => Ok(Self::SetValue(decode_payload(payload)?)),
            JSON_METADATA_INSTRUCTION_ADD_AUTHORITY => {
                Ok(Self::AddAuthority(decode_payload(payload)?))
            }
            JSON_METADATA_INSTRUCTION_REMOVE_AUTHORITY => {
                Ok(Self::RemoveAuthority(decode_payload(payload)?))
            }
            _ => Err(JsonMetadataError::InvalidInstruction),
        }
    }

    pub fn pack(&self) -> JsonMetadataResult<Vec<u8>> {
        let (tag, payload) = match self {
            Self::Initialize => (JSON_METADATA_INSTRUCTION_INITIALIZE, Ok(Vec::new())),
            Self::SetValue(args) => (JSON_METADATA_INSTRUCTION_SET_VALUE, args.try_to_vec()),
            Self::AddAuthority(args) => (JSON_METADATA_INSTRUCTION_ADD_AUTHORITY, args.try_to_vec()),
            Self::RemoveAuthority(args) => {
                (JSON_METADATA_INSTRUCTION_REMOVE_AUTHORITY, args.try_to_vec())
            }
        };
        let payload = payload.map_err(|_| JsonMetadataError::SerializationError)?;
        let mut data = Vec::with_capacity(1 + payload.len());
        data.push(tag);
        data.extend_from_slice(&payload);
        Ok(data)
    }

    pub fn set_value(fragment: impl Into<Vec<u8>>) -> Self {
        Self::SetValue(SetValueArgs {
            fragment: fragment.into(),
        })
    }
}
