//! Program-wide constants.

use anchor_lang::solana_program::program::MAX_RETURN_DATA;

/// PDA seed of the singleton registry.
pub const REGISTRY_SEED: &[u8] = b"registry";

/// PDA seed of a locker instance: `[LOCKER_SEED, registry, index_le]`.
pub const LOCKER_SEED: &[u8] = b"locker";

/// PDA seed of a locker's token vault: `[VAULT_SEED, locker]`.
pub const VAULT_SEED: &[u8] = b"vault";

/// PDA seed of a depositor ledger record: `[DEPOSIT_SEED, locker, owner]`.
pub const DEPOSIT_SEED: &[u8] = b"deposit";

/// PDA seed of a per-proposal vote record: `[VOTE_SEED, locker, voter, proposal_id_le]`.
pub const VOTE_SEED: &[u8] = b"vote";

/// PDA seed of a resolved proposal: `[ARCHIVE_SEED, locker, index_le]`.
pub const ARCHIVE_SEED: &[u8] = b"archive";

/// Shortest voting window a proposal may be opened with (one day).
pub const MIN_PROPOSAL_DURATION: i64 = 86_400;

/// Share of the frozen voting snapshot either side needs to settle a proposal.
pub const PASS_THRESHOLD_PERCENT: u64 = 51;

/// Upper bound of every unlock percentage.
pub const MAX_PERCENT: u8 = 100;

/// Max byte length of a locker's metadata URI.
pub const MAX_METADATA_URI_LEN: usize = 200;

/// Max lockers returned by one `list_lockers` page: a borsh `Vec<Pubkey>`
/// (u32 length + 32 bytes each) must fit in the runtime's return data.
pub const MAX_PAGE_SIZE: u64 = ((MAX_RETURN_DATA - 4) / 32) as u64;
