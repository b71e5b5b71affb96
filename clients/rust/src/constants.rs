use solana_sdk::pubkey::Pubkey;

pub const JSON_METADATA_PROGRAM_ID: Pubkey = json_metadata::ID;

/// Largest SetValue fragment sent in one instruction. Leaves room for the four
/// account keys, signatures and blockhash inside the 1232 byte packet limit.
pub const DEFAULT_MAX_FRAGMENT_LEN: usize = 900;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";
