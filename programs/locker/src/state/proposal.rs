use anchor_lang::prelude::*;

/// Depositor referendum on raising a locker's unlocked percent.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proposal {
    /// 1-based, sequential per locker.
    pub id: u64,
    pub unlock_percent: u8,
    pub start_ts: i64,
    /// Voting deadline while open; resolution time once archived.
    pub end_ts: i64,
    pub agree: u64,
    pub disagree: u64,
    /// Locked principal at open time; the quorum denominator, never recomputed.
    pub total_power: u64,
    pub passed: bool,
}

impl Proposal {
    pub const SIZE: usize =
        8 + // id
        1 + // unlock_percent
        8 + // start_ts
        8 + // end_ts
        8 + // agree
        8 + // disagree
        8 + // total_power
        1;  // passed
}

/// Power one voter has committed to one proposal.
#[account]
pub struct VoteRecord {
    pub locker: Pubkey,
    pub voter: Pubkey,
    pub proposal_id: u64,
    /// Cumulative power over both sides.
    pub power: u64,
    pub agree_power: u64,
    pub disagree_power: u64,
    pub bump: u8,
}

impl VoteRecord {
    pub const SIZE: usize =
        32 + // locker
        32 + // voter
        8 +  // proposal_id
        8 +  // power
        8 +  // agree_power
        8 +  // disagree_power
        1;   // bump
}

/// Append-only archive entry, indexed by resolution order.
#[account]
pub struct ArchivedProposal {
    pub locker: Pubkey,
    pub index: u64,
    pub proposal: Proposal,
    pub bump: u8,
}

impl ArchivedProposal {
    pub const SIZE: usize = 32 + 8 + Proposal::SIZE + 1;
}
