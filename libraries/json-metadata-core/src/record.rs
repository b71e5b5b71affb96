//! Metadata account record.
//!
//! Layout: `[bump:1][mutable:1][authority_count:4(LE)][authority_count * 32]`
//!
//! This is exactly the borsh encoding of [`MetadataRecord`], which is how it is
//! written. Decoding checks the lengths by hand first so a truncated or corrupt
//! account is reported as [`JsonMetadataError::MalformedRecord`].

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::{JsonMetadataError, JsonMetadataResult};

/// A 32-byte signer identity.
pub type Authority = [u8; 32];

pub const AUTHORITY_LEN: usize = 32;

/// bump + mutable + authority_count
pub const RECORD_HEADER_LEN: usize = 1 + 1 + 4;

/// Ordered set of authorities. Insertion order is the serialization order.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AuthoritySet(Vec<Authority>);

impl AuthoritySet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_authority(authority: Authority) -> Self {
        Self(vec![authority])
    }

    pub fn contains(&self, authority: &Authority) -> bool {
        self.0.iter().any(|a| a == authority)
    }

    /// Appends `authority`. Returns false if it was already present.
    pub fn insert(&mut self, authority: Authority) -> bool {
        if self.contains(&authority) {
            return false;
        }
        self.0.push(authority);
        true
    }

    /// Removes `authority`, keeping the order of the rest. Returns false if absent.
    pub fn remove(&mut self, authority: &Authority) -> bool {
        match self.0.iter().position(|a| a == authority) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Authority> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Authority] {
        &self.0
    }

    fn has_duplicates(&self) -> bool {
        self.0
            .iter()
            .enumerate()
            .any(|(i, a)| self.0[i + 1..].contains(a))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MetadataRecord {
    pub bump: u8,
    pub mutable: bool,
    pub authorities: AuthoritySet,
}

impl MetadataRecord {
    /// Record written by Initialize.
    pub fn new(bump: u8, initial_authority: Authority) -> Self {
        Self {
            bump,
            mutable: true,
            authorities: AuthoritySet::with_authority(initial_authority),
        }
    }

    /// Account size for a record holding `authority_count` authorities.
    pub const fn space(authority_count: usize) -> usize {
        RECORD_HEADER_LEN + authority_count * AUTHORITY_LEN
    }

    pub fn encoded_len(&self) -> usize {
        Self::space(self.authorities.len())
    }

    pub fn encode(&self) -> JsonMetadataResult<Vec<u8>> {
        self.try_to_vec()
            .map_err(|_| JsonMetadataError::SerializationError)
    }

    /// Decodes a record from account data. Bytes past the encoded length are ignored.
    pub fn decode(data: &[u8]) -> JsonMetadataResult<Self> {
        if data.len() < RECORD_HEADER_LEN {
            return Err(JsonMetadataError::MalformedRecord);
        }
        if data[1] > 1 {
            return Err(JsonMetadataError::MalformedRecord);
        }
        let mut count_bytes = [0u8; 4];
        count_bytes.copy_from_slice(&data[2..RECORD_HEADER_LEN]);
        let count = u32::from_le_bytes(count_bytes) as usize;
        let encoded_len = count
            .checked_mul(AUTHORITY_LEN)
            .and_then(|n| n.checked_add(RECORD_HEADER_LEN))
            .ok_or(JsonMetadataError::MalformedRecord)?;
        if encoded_len > data.len() {
            return Err(JsonMetadataError::MalformedRecord);
        }

        let record = Self::deserialize(&mut &data[..encoded_len])
            .map_err(|_| JsonMetadataError::MalformedRecord)?;
        if record.authorities.is_empty() || record.authorities.has_duplicates() {
            return Err(JsonMetadataError::MalformedRecord);
        }
        Ok(record)
    }

    pub fn assert_mutable(&self) -> JsonMetadataResult<()> {
        if !self.mutable {
            return Err(JsonMetadataError::Frozen);
        }
        Ok(())
    }

    pub fn assert_authority(&self, signer: &Authority) -> JsonMetadataResult<()> {
        if !self.authorities.contains(signer) {
            return Err(JsonMetadataError::Unauthorized);
        }
        Ok(())
    }
}
