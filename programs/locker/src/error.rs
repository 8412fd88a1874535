use anchor_lang::prelude::*;

/// Custom error codes for the locker program.
#[error_code]
pub enum LockerError {
    #[msg("Locker is already initialized")]
    AlreadyInitialized,

    #[msg("Beneficiary must not be the null address")]
    InvalidBeneficiary,

    #[msg("Unauthorized: locker admin signature required")]
    UnauthorizedAdmin,

    #[msg("Unauthorized: registry owner signature required")]
    UnauthorizedRegistry,

    #[msg("Unauthorized: only the beneficiary may claim for itself")]
    UnauthorizedClaimer,

    #[msg("Fee does not match the registry quote")]
    FeeMismatch,

    #[msg("Fee recipient does not match the registry configuration")]
    InvalidFeeRecipient,

    #[msg("Percent must be within 0..=100")]
    InvalidPercent,

    #[msg("Percent must exceed the current unlocked percent")]
    PercentNotAboveCurrent,

    #[msg("No pending unlock suggestion above the current percent")]
    NoPendingSuggestion,

    #[msg("A proposal is already active")]
    ProposalAlreadyActive,

    #[msg("No active proposal")]
    NoActiveProposal,

    #[msg("Proposal end time is too close")]
    ProposalDurationTooShort,

    #[msg("Voting period has ended")]
    VotingClosed,

    #[msg("Vote exceeds live voting power")]
    ExceedsVotingPower,

    #[msg("Proposal cannot be ended yet")]
    CannotEndYet,

    #[msg("Start time must not be in the past")]
    InvalidStartTime,

    #[msg("End time must be after start time")]
    InvalidEndTime,

    #[msg("Cliff time must not be in the past")]
    InvalidCliffTime,

    #[msg("Vesting duration must be positive")]
    InvalidDuration,

    #[msg("Periodicity must be positive, at most the duration and divide it evenly")]
    InvalidPeriodicity,

    #[msg("Metadata URI too long")]
    MetadataTooLong,

    #[msg("Amount must be > 0")]
    ZeroAmount,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("The locked mint cannot be recovered")]
    CannotRecoverLockedMint,

    #[msg("Nothing to recover")]
    NothingToRecover,

    #[msg("Page size too large")]
    PageTooLarge,

    #[msg("Math overflow")]
    MathOverflow,
}

/// Result of the pure custody engine; converts into an Anchor error with `?`.
pub type LockerResult<T> = core::result::Result<T, LockerError>;
