use anchor_lang::prelude::*;

use crate::constants::{MAX_METADATA_URI_LEN, MAX_PERCENT, MIN_PROPOSAL_DURATION, PASS_THRESHOLD_PERCENT};
use crate::error::{LockerError, LockerResult};
use crate::state::{DepositRecord, FeeQuote, FeeSource, Proposal, Schedule, VoteRecord};
use crate::utils::schedule::apply_override;

/// One custody instance: configuration, aggregate ledger, escape hatch and governance slot.
#[account]
pub struct Locker {
    /// Registry that created this locker; the only party allowed to ratify or recover.
    pub registry: Pubkey,
    /// Instance owner.
    pub admin: Pubkey,
    /// Managed token mint.
    pub mint: Pubkey,
    /// Vault token account (PDA, authority = this locker).
    pub vault: Pubkey,
    /// Creation index within the registry (PDA seed).
    pub index: u64,
    pub schedule: Schedule,
    /// Locked asset is an LP position token (display only).
    pub is_lp: bool,
    pub metadata_uri: String,
    /// blake3 of `metadata_uri`.
    pub metadata_digest: [u8; 32],
    pub total_deposited: u64,
    pub total_claimed: u64,
    /// Override floor applied to every account; only grows.
    pub unlocked_percent: u8,
    /// Admin suggestion awaiting registry ratification.
    pub suggested_percent: Option<u8>,
    /// Last proposal id handed out.
    pub proposal_count: u64,
    pub active_proposal: Option<Proposal>,
    /// Number of resolved proposals; next archive index.
    pub archived_count: u64,
    pub bump: u8,
}

/// Creation parameters handed over by the registry.
pub struct LockerInit {
    pub registry: Pubkey,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub index: u64,
    pub schedule: Schedule,
    pub is_lp: bool,
    pub metadata_uri: String,
    pub bump: u8,
}

impl Locker {
    pub const SIZE: usize =
        32 + // registry
        32 + // admin
        32 + // mint
        32 + // vault
        8 +  // index
        Schedule::SIZE +
        1 +  // is_lp
        4 + MAX_METADATA_URI_LEN +
        32 + // metadata_digest
        8 +  // total_deposited
        8 +  // total_claimed
        1 +  // unlocked_percent
        1 + 1 + // suggested_percent
        8 +  // proposal_count
        1 + Proposal::SIZE + // active_proposal
        8 +  // archived_count
        1;   // bump

    /// One-shot initialization hook run by the registry at creation.
    pub fn initialize(&mut self, init: LockerInit, now_ts: i64) -> LockerResult<()> {
        if self.registry != Pubkey::default() {
            return Err(LockerError::AlreadyInitialized);
        }
        if init.metadata_uri.len() > MAX_METADATA_URI_LEN {
            return Err(LockerError::MetadataTooLong);
        }
        init.schedule.validate(now_ts)?;

        self.metadata_digest = *blake3::hash(init.metadata_uri.as_bytes()).as_bytes();
        self.registry = init.registry;
        self.admin = init.admin;
        self.mint = init.mint;
        self.vault = init.vault;
        self.index = init.index;
        self.schedule = init.schedule;
        self.is_lp = init.is_lp;
        self.metadata_uri = init.metadata_uri;
        self.total_deposited = 0;
        self.total_claimed = 0;
        self.unlocked_percent = 0;
        self.suggested_percent = None;
        self.proposal_count = 0;
        self.active_proposal = None;
        self.archived_count = 0;
        self.bump = init.bump;
        Ok(())
    }

    /// Schedule release of `principal` at `now_ts`, floored by the override percent.
    pub fn unlocked_amount(&self, principal: u64, now_ts: i64) -> LockerResult<u64> {
        let scheduled = self.schedule.unlocked(principal, now_ts)?;
        apply_override(principal, scheduled, self.unlocked_percent)
    }

    pub fn claimable(&self, record: &DepositRecord, now_ts: i64) -> LockerResult<u64> {
        self.unlocked_amount(record.principal, now_ts)?
            .checked_sub(record.claimed)
            .ok_or(LockerError::MathOverflow)
    }

    /// Still-locked principal of `record`.
    pub fn voting_power(&self, record: &DepositRecord, now_ts: i64) -> LockerResult<u64> {
        record
            .principal
            .checked_sub(self.unlocked_amount(record.principal, now_ts)?)
            .ok_or(LockerError::MathOverflow)
    }

    /// Credits `record` with what the vault actually received, `post_balance - pre_balance`.
    /// Transfer-fee mints deliver less than the requested amount.
    pub fn credit_deposit(
        &mut self,
        record: &mut DepositRecord,
        beneficiary: &Pubkey,
        pre_balance: u64,
        post_balance: u64,
    ) -> LockerResult<u64> {
        if *beneficiary == Pubkey::default()
            || (!record.is_new() && record.owner != *beneficiary)
        {
            return Err(LockerError::InvalidBeneficiary);
        }
        let received = post_balance
            .checked_sub(pre_balance)
            .ok_or(LockerError::MathOverflow)?;
        if received == 0 {
            return Err(LockerError::ZeroAmount);
        }
        let principal = record
            .principal
            .checked_add(received)
            .ok_or(LockerError::MathOverflow)?;
        let total = self
            .total_deposited
            .checked_add(received)
            .ok_or(LockerError::MathOverflow)?;
        record.owner = *beneficiary;
        record.principal = principal;
        self.total_deposited = total;
        Ok(received)
    }

    /// Books everything unlocked but unclaimed as claimed and returns it.
    /// With `owner_only` the caller must be the record's owner; otherwise anyone
    /// may trigger the payout, which always goes to the owner.
    /// The caller moves the tokens only after this bookkeeping is committed.
    pub fn settle_claim(
        &mut self,
        record: &mut DepositRecord,
        caller: &Pubkey,
        owner_only: bool,
        now_ts: i64,
    ) -> LockerResult<u64> {
        if owner_only && *caller != record.owner {
            return Err(LockerError::UnauthorizedClaimer);
        }
        let amount = self.claimable(record, now_ts)?;
        let claimed = record
            .claimed
            .checked_add(amount)
            .ok_or(LockerError::MathOverflow)?;
        let total = self
            .total_claimed
            .checked_add(amount)
            .ok_or(LockerError::MathOverflow)?;
        record.claimed = claimed;
        self.total_claimed = total;
        Ok(amount)
    }

    /// Records an admin suggestion and returns the fee the admin must remit for it.
    /// `expected_fee` must match the registry's current emergency-unlock fee.
    pub fn suggest_unlock<F: FeeSource>(
        &mut self,
        caller: &Pubkey,
        percent: u8,
        expected_fee: u64,
        fees: &F,
    ) -> LockerResult<FeeQuote> {
        self.require_admin(caller)?;
        self.require_raise(percent)?;
        let quote = fees.fee_quote();
        quote.confirm_emergency_unlock_fee(expected_fee)?;
        self.suggested_percent = Some(percent);
        Ok(quote)
    }

    /// Registry hook: applies the pending suggestion.
    pub fn ratify_suggested_unlock(&mut self) -> LockerResult<u8> {
        match self.suggested_percent {
            Some(percent) if percent > self.unlocked_percent => {
                self.unlocked_percent = percent;
                self.suggested_percent = None;
                Ok(percent)
            }
            _ => Err(LockerError::NoPendingSuggestion),
        }
    }

    /// Id of the open proposal, `0` when none.
    pub fn active_proposal_id(&self) -> u64 {
        self.active_proposal.map_or(0, |p| p.id)
    }

    pub fn start_proposal(
        &mut self,
        caller: &Pubkey,
        unlock_percent: u8,
        end_ts: i64,
        now_ts: i64,
    ) -> LockerResult<Proposal> {
        self.require_admin(caller)?;
        if self.active_proposal.is_some() {
            return Err(LockerError::ProposalAlreadyActive);
        }
        self.require_raise(unlock_percent)?;
        let earliest_end = now_ts
            .checked_add(MIN_PROPOSAL_DURATION)
            .ok_or(LockerError::MathOverflow)?;
        if end_ts < earliest_end {
            return Err(LockerError::ProposalDurationTooShort);
        }

        let unlocked = self.unlocked_amount(self.total_deposited, now_ts)?;
        let total_power = self
            .total_deposited
            .checked_sub(unlocked)
            .ok_or(LockerError::MathOverflow)?;
        let id = self
            .proposal_count
            .checked_add(1)
            .ok_or(LockerError::MathOverflow)?;

        let proposal = Proposal {
            id,
            unlock_percent,
            start_ts: now_ts,
            end_ts,
            agree: 0,
            disagree: 0,
            total_power,
            passed: false,
        };
        self.proposal_count = id;
        self.active_proposal = Some(proposal);
        Ok(proposal)
    }

    /// Adds `power` to one side, capped by the voter's live power minus what they already committed.
    pub fn cast_vote(
        &mut self,
        record: &DepositRecord,
        ballot: &mut VoteRecord,
        power: u64,
        agree: bool,
        now_ts: i64,
    ) -> LockerResult<Proposal> {
        if power == 0 {
            return Err(LockerError::ZeroAmount);
        }
        let live_power = self.voting_power(record, now_ts)?;
        let proposal = self
            .active_proposal
            .as_mut()
            .ok_or(LockerError::NoActiveProposal)?;
        if now_ts > proposal.end_ts {
            return Err(LockerError::VotingClosed);
        }

        let committed = ballot
            .power
            .checked_add(power)
            .ok_or(LockerError::MathOverflow)?;
        if committed > live_power {
            return Err(LockerError::ExceedsVotingPower);
        }

        if agree {
            let side = ballot
                .agree_power
                .checked_add(power)
                .ok_or(LockerError::MathOverflow)?;
            let tally = proposal
                .agree
                .checked_add(power)
                .ok_or(LockerError::MathOverflow)?;
            ballot.agree_power = side;
            proposal.agree = tally;
        } else {
            let side = ballot
                .disagree_power
                .checked_add(power)
                .ok_or(LockerError::MathOverflow)?;
            let tally = proposal
                .disagree
                .checked_add(power)
                .ok_or(LockerError::MathOverflow)?;
            ballot.disagree_power = side;
            proposal.disagree = tally;
        }
        ballot.proposal_id = proposal.id;
        ballot.power = committed;
        Ok(*proposal)
    }

    /// Resolves the open proposal and returns it as archived.
    /// The admin may end it at any time, anyone else only past the deadline.
    pub fn end_proposal(&mut self, caller: &Pubkey, now_ts: i64) -> LockerResult<Proposal> {
        let proposal = self
            .active_proposal
            .as_ref()
            .ok_or(LockerError::NoActiveProposal)?;
        let expired = now_ts > proposal.end_ts;
        if *caller != self.admin && !expired {
            return Err(LockerError::UnauthorizedAdmin);
        }

        let threshold = pass_threshold(proposal.total_power)?;
        let passed = if proposal.agree >= threshold {
            true
        } else if proposal.disagree >= threshold || expired {
            false
        } else {
            return Err(LockerError::CannotEndYet);
        };
        let archived_count = self
            .archived_count
            .checked_add(1)
            .ok_or(LockerError::MathOverflow)?;

        let mut resolved = *proposal;
        resolved.passed = passed;
        resolved.end_ts = now_ts;
        if passed {
            self.unlocked_percent = self.unlocked_percent.max(resolved.unlock_percent);
        }
        self.active_proposal = None;
        self.archived_count = archived_count;
        Ok(resolved)
    }

    /// Balance of a stray token account the registry may sweep; the managed mint never leaves this way.
    pub fn recoverable(&self, mint: &Pubkey, balance: u64) -> LockerResult<u64> {
        if *mint == self.mint {
            return Err(LockerError::CannotRecoverLockedMint);
        }
        if balance == 0 {
            return Err(LockerError::NothingToRecover);
        }
        Ok(balance)
    }

    pub fn require_admin(&self, caller: &Pubkey) -> LockerResult<()> {
        if *caller != self.admin {
            return Err(LockerError::UnauthorizedAdmin);
        }
        Ok(())
    }

    fn require_raise(&self, percent: u8) -> LockerResult<()> {
        if percent > MAX_PERCENT {
            return Err(LockerError::InvalidPercent);
        }
        if percent <= self.unlocked_percent {
            return Err(LockerError::PercentNotAboveCurrent);
        }
        Ok(())
    }
}

/// 51% of the frozen snapshot, floored.
pub fn pass_threshold(total_power: u64) -> LockerResult<u64> {
    let v = (total_power as u128)
        .checked_mul(PASS_THRESHOLD_PERCENT as u128)
        .ok_or(LockerError::MathOverflow)?
        / 100;
    u64::try_from(v).map_err(|_| LockerError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    const WEEK: i64 = 7 * DAY;
    const T0: i64 = 1_700_000_000;
    const START: i64 = T0 + DAY;
    const SHARES: [u64; 3] = [300, 200, 100];

    struct FlatFee(u64);

    impl FeeSource for FlatFee {
        fn fee_quote(&self) -> FeeQuote {
            FeeQuote {
                recipient: key(99),
                create_fee: 0,
                emergency_unlock_fee: self.0,
            }
        }
    }

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn admin() -> Pubkey {
        key(1)
    }

    fn linear() -> Schedule {
        Schedule::Linear {
            start_ts: START,
            end_ts: START + WEEK,
        }
    }

    fn vesting() -> Schedule {
        Schedule::Vesting {
            cliff_ts: START,
            duration: WEEK,
            periodicity: WEEK / 4,
        }
    }

    fn blank() -> Locker {
        Locker {
            registry: Pubkey::default(),
            admin: Pubkey::default(),
            mint: Pubkey::default(),
            vault: Pubkey::default(),
            index: 0,
            schedule: Schedule::Linear { start_ts: 0, end_ts: 0 },
            is_lp: false,
            metadata_uri: String::new(),
            metadata_digest: [0; 32],
            total_deposited: 0,
            total_claimed: 0,
            unlocked_percent: 0,
            suggested_percent: None,
            proposal_count: 0,
            active_proposal: None,
            archived_count: 0,
            bump: 0,
        }
    }

    fn init_params(schedule: Schedule) -> LockerInit {
        LockerInit {
            registry: key(2),
            admin: admin(),
            mint: key(3),
            vault: key(4),
            index: 0,
            schedule,
            is_lp: false,
            metadata_uri: "ipfs://locker".to_string(),
            bump: 254,
        }
    }

    fn record(owner: u8) -> DepositRecord {
        DepositRecord {
            locker: key(5),
            owner: key(owner),
            principal: 0,
            claimed: 0,
            bump: 0,
        }
    }

    fn ballot(voter: u8) -> VoteRecord {
        VoteRecord {
            locker: key(5),
            voter: key(voter),
            proposal_id: 0,
            power: 0,
            agree_power: 0,
            disagree_power: 0,
            bump: 0,
        }
    }

    /// Credits `amount` to the record's owner as a full, fee-free vault inflow.
    fn credit(locker: &mut Locker, r: &mut DepositRecord, amount: u64) -> u64 {
        let owner = r.owner;
        let pre = locker.total_deposited;
        locker.credit_deposit(r, &owner, pre, pre + amount).unwrap()
    }

    fn settle(locker: &mut Locker, r: &mut DepositRecord, now: i64) -> u64 {
        let owner = r.owner;
        locker.settle_claim(r, &owner, true, now).unwrap()
    }

    /// Locker funded 300/200/100 for depositors 11, 12, 13.
    fn funded(schedule: Schedule) -> (Locker, Vec<DepositRecord>) {
        let mut locker = blank();
        locker.initialize(init_params(schedule), T0).unwrap();
        let mut records: Vec<DepositRecord> = (11..14).map(record).collect();
        for (r, amount) in records.iter_mut().zip(SHARES) {
            credit(&mut locker, r, amount);
        }
        (locker, records)
    }

    fn claimables(locker: &Locker, records: &[DepositRecord], now: i64) -> Vec<u64> {
        records.iter().map(|r| locker.claimable(r, now).unwrap()).collect()
    }

    fn settle_all(locker: &mut Locker, records: &mut [DepositRecord], now: i64) -> Vec<u64> {
        records
            .iter_mut()
            .map(|r| settle(locker, r, now))
            .collect()
    }

    #[test]
    fn initialize_records_configuration_once() {
        let mut locker = blank();
        locker.initialize(init_params(linear()), T0).unwrap();
        assert_eq!(locker.admin, admin());
        assert_eq!(locker.schedule, linear());
        assert_eq!(
            locker.metadata_digest,
            *blake3::hash(b"ipfs://locker").as_bytes()
        );
        assert!(matches!(
            locker.initialize(init_params(vesting()), T0),
            Err(LockerError::AlreadyInitialized)
        ));
        assert_eq!(locker.schedule, linear());
    }

    #[test]
    fn initialize_rejects_bad_parameters() {
        let mut locker = blank();
        let past = Schedule::Linear {
            start_ts: T0 - 1,
            end_ts: T0 + WEEK,
        };
        assert!(matches!(
            locker.initialize(init_params(past), T0),
            Err(LockerError::InvalidStartTime)
        ));

        let uneven = Schedule::Vesting {
            cliff_ts: START,
            duration: WEEK,
            periodicity: WEEK / 3 + 1,
        };
        assert!(matches!(
            locker.initialize(init_params(uneven), T0),
            Err(LockerError::InvalidPeriodicity)
        ));

        let mut params = init_params(linear());
        params.metadata_uri = "x".repeat(MAX_METADATA_URI_LEN + 1);
        assert!(matches!(
            locker.initialize(params, T0),
            Err(LockerError::MetadataTooLong)
        ));
        assert_eq!(locker.registry, Pubkey::default());
    }

    #[test]
    fn deposits_accumulate_per_beneficiary() {
        let (mut locker, mut records) = funded(linear());
        credit(&mut locker, &mut records[0], 50);
        assert_eq!(records[0].principal, 350);
        assert_eq!(locker.total_deposited, 650);
        assert!(matches!(
            locker.credit_deposit(&mut records[1], &key(12), 650, 650),
            Err(LockerError::ZeroAmount)
        ));
        assert_eq!(records[1].principal, 200);
        assert_eq!(locker.total_deposited, 650);
    }

    #[test]
    fn first_deposit_binds_record_to_beneficiary() {
        let (mut locker, _) = funded(linear());
        let mut fresh = record(0);
        assert!(fresh.is_new());
        let received = locker.credit_deposit(&mut fresh, &key(20), 0, 40).unwrap();
        assert_eq!(received, 40);
        assert_eq!(fresh.owner, key(20));
        assert_eq!(fresh.principal, 40);
        assert_eq!(locker.total_deposited, 640);
    }

    #[test]
    fn deposit_credits_observed_vault_delta() {
        let (mut locker, mut records) = funded(linear());
        // 100 requested, a 5% transfer fee leaves 95 in the vault
        let received = locker
            .credit_deposit(&mut records[0], &key(11), 600, 695)
            .unwrap();
        assert_eq!(received, 95);
        assert_eq!(records[0].principal, 395);
        assert_eq!(locker.total_deposited, 695);
        assert_eq!(locker.voting_power(&records[0], T0).unwrap(), 395);
    }

    #[test]
    fn deposit_rejections_leave_ledger_untouched() {
        let (mut locker, mut records) = funded(linear());

        assert!(matches!(
            locker.credit_deposit(&mut records[0], &Pubkey::default(), 600, 700),
            Err(LockerError::InvalidBeneficiary)
        ));
        let mut fresh = record(0);
        assert!(matches!(
            locker.credit_deposit(&mut fresh, &Pubkey::default(), 600, 700),
            Err(LockerError::InvalidBeneficiary)
        ));
        assert!(fresh.is_new());
        assert!(matches!(
            locker.credit_deposit(&mut records[0], &key(12), 600, 700),
            Err(LockerError::InvalidBeneficiary)
        ));
        assert!(matches!(
            locker.credit_deposit(&mut records[0], &key(11), 600, 599),
            Err(LockerError::MathOverflow)
        ));

        assert_eq!(fresh.principal, 0);
        assert_eq!(records[0].principal, 300);
        assert_eq!(records[0].owner, key(11));
        assert_eq!(locker.total_deposited, 600);
    }

    #[test]
    fn linear_claims_at_quarter_half_and_end() {
        let (mut locker, mut records) = funded(linear());

        assert_eq!(claimables(&locker, &records, START - 1), vec![0, 0, 0]);
        assert_eq!(settle_all(&mut locker, &mut records, START - 1), vec![0, 0, 0]);

        let quarter = START + WEEK / 4;
        assert_eq!(claimables(&locker, &records, quarter), vec![75, 50, 25]);
        assert_eq!(settle_all(&mut locker, &mut records, quarter), vec![75, 50, 25]);

        let half = START + WEEK / 2;
        assert_eq!(settle_all(&mut locker, &mut records, half), vec![75, 50, 25]);

        let end = START + WEEK;
        let remaining: u64 = records.iter().map(|r| r.principal - r.claimed).sum();
        let last = settle_all(&mut locker, &mut records, end);
        assert_eq!(last, vec![150, 100, 50]);
        assert_eq!(last.iter().sum::<u64>(), remaining);

        assert_eq!(locker.total_claimed, 600);
        assert_eq!(locker.total_deposited - locker.total_claimed, 0);
        for r in &records {
            assert_eq!(r.claimed, r.principal);
        }
    }

    #[test]
    fn second_claim_in_same_instant_is_empty() {
        let (mut locker, mut records) = funded(linear());
        let now = START + WEEK / 3;
        let first = settle(&mut locker, &mut records[0], now);
        assert_eq!(first, 100);
        assert_eq!(locker.claimable(&records[0], now).unwrap(), 0);
        assert_eq!(settle(&mut locker, &mut records[0], now), 0);
        assert_eq!(records[0].claimed, 100);
        assert_eq!(locker.total_claimed, 100);
    }

    #[test]
    fn only_the_owner_claims_but_anyone_may_claim_for_them() {
        let (mut locker, mut records) = funded(linear());
        let now = START + WEEK / 3;

        assert!(matches!(
            locker.settle_claim(&mut records[0], &key(12), true, now),
            Err(LockerError::UnauthorizedClaimer)
        ));
        assert_eq!(records[0].claimed, 0);
        assert_eq!(locker.total_claimed, 0);

        // on-behalf settlement credits the owner's ledger, not the caller's
        let paid = locker.settle_claim(&mut records[0], &key(12), false, now).unwrap();
        assert_eq!(paid, 100);
        assert_eq!(records[0].claimed, 100);
        assert_eq!(records[1].claimed, 0);
        assert_eq!(locker.total_claimed, 100);
    }

    #[test]
    fn vesting_cliff_then_periods() {
        let (locker, records) = funded(vesting());

        assert_eq!(claimables(&locker, &records, START - 1), vec![0, 0, 0]);
        for (r, principal) in records.iter().zip(SHARES) {
            assert_eq!(locker.voting_power(r, START - 1).unwrap(), principal);
        }

        let one_period = START + WEEK / 4;
        assert_eq!(claimables(&locker, &records, one_period), vec![75, 50, 25]);
        let powers: Vec<u64> = records
            .iter()
            .map(|r| locker.voting_power(r, one_period).unwrap())
            .collect();
        assert_eq!(powers, vec![225, 150, 75]);
    }

    #[test]
    fn voting_power_shrinks_to_zero() {
        let (locker, records) = funded(linear());
        let mut previous = u64::MAX;
        for step in 0..=8 {
            let now = START + step * WEEK / 8;
            let power = locker.voting_power(&records[0], now).unwrap();
            assert!(power <= previous);
            previous = power;
        }
        assert_eq!(locker.voting_power(&records[0], START + WEEK).unwrap(), 0);
        assert_eq!(locker.voting_power(&records[0], START + 2 * WEEK).unwrap(), 0);
    }

    #[test]
    fn escape_hatch_suggestion_and_ratification() {
        let (mut locker, records) = funded(linear());
        let fees = FlatFee(7);

        assert!(matches!(
            locker.suggest_unlock(&key(11), 30, 7, &fees),
            Err(LockerError::UnauthorizedAdmin)
        ));
        assert!(matches!(
            locker.suggest_unlock(&admin(), 0, 7, &fees),
            Err(LockerError::PercentNotAboveCurrent)
        ));
        assert!(matches!(
            locker.suggest_unlock(&admin(), 101, 7, &fees),
            Err(LockerError::InvalidPercent)
        ));
        assert!(matches!(
            locker.ratify_suggested_unlock(),
            Err(LockerError::NoPendingSuggestion)
        ));

        assert!(matches!(
            locker.suggest_unlock(&admin(), 30, 6, &fees),
            Err(LockerError::FeeMismatch)
        ));
        assert_eq!(locker.suggested_percent, None);

        let quote = locker.suggest_unlock(&admin(), 30, 7, &fees).unwrap();
        assert_eq!(quote.emergency_unlock_fee, 7);
        assert_eq!(quote.recipient, key(99));
        assert_eq!(locker.suggested_percent, Some(30));
        assert_eq!(locker.unlocked_percent, 0);

        // superseded before ratification
        locker.suggest_unlock(&admin(), 50, 7, &fees).unwrap();
        assert_eq!(locker.ratify_suggested_unlock().unwrap(), 50);
        assert_eq!(locker.unlocked_percent, 50);
        assert_eq!(locker.suggested_percent, None);
        assert!(matches!(
            locker.ratify_suggested_unlock(),
            Err(LockerError::NoPendingSuggestion)
        ));

        for p in [20, 50] {
            assert!(matches!(
                locker.suggest_unlock(&admin(), p, 7, &fees),
                Err(LockerError::PercentNotAboveCurrent)
            ));
        }

        // override is a floor before the schedule starts, the schedule wins later
        assert_eq!(claimables(&locker, &records, START - 1), vec![150, 100, 50]);
        assert_eq!(
            claimables(&locker, &records, START + 3 * WEEK / 4),
            vec![225, 150, 75]
        );
    }

    #[test]
    fn proposal_passes_as_soon_as_agree_crosses_threshold() {
        let (mut locker, records) = funded(linear());
        let opened = locker.start_proposal(&admin(), 40, T0 + WEEK, T0).unwrap();
        assert_eq!(opened.id, 1);
        assert_eq!(opened.total_power, 600);
        assert_eq!(locker.active_proposal_id(), 1);

        let now = T0 + 10;
        let mut ballots: Vec<VoteRecord> = (11..14).map(ballot).collect();
        locker.cast_vote(&records[0], &mut ballots[0], 100, true, now).unwrap();
        locker.cast_vote(&records[1], &mut ballots[1], 200, true, now).unwrap();
        locker.cast_vote(&records[2], &mut ballots[2], 50, true, now).unwrap();
        let tally = locker.cast_vote(&records[2], &mut ballots[2], 50, false, now).unwrap();
        assert_eq!((tally.agree, tally.disagree), (350, 50));
        assert_eq!(ballots[2].power, 100);
        assert_eq!((ballots[2].agree_power, ballots[2].disagree_power), (50, 50));
        assert_eq!(ballots[2].proposal_id, 1);

        assert_eq!(pass_threshold(600).unwrap(), 306);
        let resolved = locker.end_proposal(&admin(), now).unwrap();
        assert!(resolved.passed);
        assert_eq!(resolved.end_ts, now);
        assert_eq!(resolved.total_power, 600);
        assert_eq!(locker.unlocked_percent, 40);
        assert_eq!(locker.active_proposal, None);
        assert_eq!(locker.active_proposal_id(), 0);
        assert_eq!(locker.archived_count, 1);

        // raised percent feeds straight into claimable amounts
        assert_eq!(claimables(&locker, &records, now), vec![120, 80, 40]);
    }

    #[test]
    fn disagreeing_majority_fails_the_proposal() {
        let (mut locker, records) = funded(linear());
        locker.start_proposal(&admin(), 40, T0 + WEEK, T0).unwrap();
        let now = T0 + 10;
        let mut ballots: Vec<VoteRecord> = (11..14).map(ballot).collect();
        locker.cast_vote(&records[2], &mut ballots[2], 50, true, now).unwrap();
        locker.cast_vote(&records[0], &mut ballots[0], 150, false, now).unwrap();
        locker.cast_vote(&records[1], &mut ballots[1], 200, false, now).unwrap();

        // outsiders wait for the deadline
        assert!(matches!(
            locker.end_proposal(&key(12), now),
            Err(LockerError::UnauthorizedAdmin)
        ));

        let late = T0 + WEEK + 1;
        let resolved = locker.end_proposal(&key(12), late).unwrap();
        assert!(!resolved.passed);
        assert_eq!(resolved.end_ts, late);
        assert_eq!((resolved.agree, resolved.disagree), (50, 350));
        assert_eq!(locker.unlocked_percent, 0);
        assert_eq!(locker.active_proposal, None);
    }

    #[test]
    fn admin_may_close_early_once_disagree_crosses_threshold() {
        let (mut locker, records) = funded(linear());
        locker.start_proposal(&admin(), 40, T0 + WEEK, T0).unwrap();
        let now = T0 + 10;
        let mut ballots: Vec<VoteRecord> = (11..14).map(ballot).collect();
        locker.cast_vote(&records[0], &mut ballots[0], 300, false, now).unwrap();
        assert!(matches!(
            locker.end_proposal(&admin(), now),
            Err(LockerError::CannotEndYet)
        ));
        locker.cast_vote(&records[1], &mut ballots[1], 6, false, now).unwrap();
        let resolved = locker.end_proposal(&admin(), now).unwrap();
        assert!(!resolved.passed);
        assert_eq!(locker.unlocked_percent, 0);
    }

    #[test]
    fn votes_are_capped_by_live_power_while_snapshot_stays_fixed() {
        let (mut locker, records) = funded(linear());
        locker.start_proposal(&admin(), 40, T0 + WEEK, T0).unwrap();
        let mut b = ballot(11);

        let mid = START + WEEK / 2;
        assert_eq!(locker.voting_power(&records[0], mid).unwrap(), 150);
        assert!(matches!(
            locker.cast_vote(&records[0], &mut b, 151, true, mid),
            Err(LockerError::ExceedsVotingPower)
        ));
        locker.cast_vote(&records[0], &mut b, 100, true, mid).unwrap();
        assert!(matches!(
            locker.cast_vote(&records[0], &mut b, 51, false, mid),
            Err(LockerError::ExceedsVotingPower)
        ));
        locker.cast_vote(&records[0], &mut b, 50, false, mid).unwrap();
        assert_eq!(b.power, 150);

        // live power keeps decaying: already committed power now exceeds it
        let later = START + 3 * WEEK / 4;
        assert!(matches!(
            locker.cast_vote(&records[0], &mut b, 1, true, later),
            Err(LockerError::ExceedsVotingPower)
        ));

        let active = locker.active_proposal.unwrap();
        assert_eq!(active.total_power, 600);
        assert_eq!((active.agree, active.disagree), (100, 50));
    }

    #[test]
    fn proposal_snapshot_counts_only_locked_principal() {
        let (mut locker, _) = funded(linear());
        let opened = locker
            .start_proposal(&admin(), 90, START + WEEK, START + WEEK / 2)
            .unwrap();
        assert_eq!(opened.total_power, 300);
        assert_eq!(opened.start_ts, START + WEEK / 2);
    }

    #[test]
    fn proposal_state_violations_are_rejected() {
        let (mut locker, records) = funded(linear());
        let mut b = ballot(11);

        assert!(matches!(
            locker.cast_vote(&records[0], &mut b, 10, true, T0),
            Err(LockerError::NoActiveProposal)
        ));
        assert!(matches!(
            locker.end_proposal(&admin(), T0),
            Err(LockerError::NoActiveProposal)
        ));
        assert!(matches!(
            locker.start_proposal(&key(11), 40, T0 + WEEK, T0),
            Err(LockerError::UnauthorizedAdmin)
        ));
        assert!(matches!(
            locker.start_proposal(&admin(), 0, T0 + WEEK, T0),
            Err(LockerError::PercentNotAboveCurrent)
        ));
        assert!(matches!(
            locker.start_proposal(&admin(), 40, T0 + DAY - 1, T0),
            Err(LockerError::ProposalDurationTooShort)
        ));

        locker.start_proposal(&admin(), 40, T0 + DAY, T0).unwrap();
        assert!(matches!(
            locker.start_proposal(&admin(), 50, T0 + WEEK, T0),
            Err(LockerError::ProposalAlreadyActive)
        ));
        assert!(matches!(
            locker.cast_vote(&records[0], &mut b, 0, true, T0),
            Err(LockerError::ZeroAmount)
        ));
        assert!(matches!(
            locker.end_proposal(&admin(), T0 + DAY),
            Err(LockerError::CannotEndYet)
        ));
        assert!(matches!(
            locker.cast_vote(&records[0], &mut b, 10, true, T0 + DAY + 1),
            Err(LockerError::VotingClosed)
        ));
        assert_eq!(b.power, 0);
        assert_eq!(locker.proposal_count, 1);
    }

    #[test]
    fn lapsed_proposal_fails_and_ids_keep_counting() {
        let (mut locker, _) = funded(linear());
        locker.start_proposal(&admin(), 40, T0 + DAY, T0).unwrap();
        let resolved = locker.end_proposal(&key(42), T0 + DAY + 1).unwrap();
        assert!(!resolved.passed);
        assert_eq!(resolved.id, 1);

        let next = locker.start_proposal(&admin(), 40, T0 + 3 * DAY, T0 + DAY + 1).unwrap();
        assert_eq!(next.id, 2);
        assert_eq!(locker.archived_count, 1);
    }

    #[test]
    fn override_never_decreases() {
        let (mut locker, records) = funded(linear());
        let fees = FlatFee(0);
        locker.start_proposal(&admin(), 40, T0 + WEEK, T0).unwrap();
        locker.suggest_unlock(&admin(), 60, 0, &fees).unwrap();
        locker.ratify_suggested_unlock().unwrap();

        let mut b0 = ballot(11);
        let mut b1 = ballot(12);
        locker.cast_vote(&records[0], &mut b0, 120, true, T0 + 1).unwrap();
        locker.cast_vote(&records[1], &mut b1, 80, true, T0 + 1).unwrap();
        // snapshot is 600, live power is now 40% of principal: 120 + 80 < 306
        assert!(matches!(
            locker.end_proposal(&admin(), T0 + 1),
            Err(LockerError::CannotEndYet)
        ));
        let resolved = locker.end_proposal(&admin(), T0 + WEEK + 1).unwrap();
        assert!(!resolved.passed);
        assert_eq!(locker.unlocked_percent, 60);
    }

    #[test]
    fn passed_proposal_keeps_the_higher_ratified_percent() {
        let (mut locker, records) = funded(linear());
        let fees = FlatFee(0);
        locker.start_proposal(&admin(), 40, T0 + WEEK, T0).unwrap();
        let mut b0 = ballot(11);
        let mut b1 = ballot(12);
        locker.cast_vote(&records[0], &mut b0, 300, true, T0 + 1).unwrap();
        locker.cast_vote(&records[1], &mut b1, 10, true, T0 + 1).unwrap();

        locker.suggest_unlock(&admin(), 60, 0, &fees).unwrap();
        locker.ratify_suggested_unlock().unwrap();

        let resolved = locker.end_proposal(&admin(), T0 + 2).unwrap();
        assert!(resolved.passed);
        assert_eq!(locker.unlocked_percent, 60);
    }

    #[test]
    fn pending_suggestion_overtaken_by_vote_cannot_be_ratified() {
        let (mut locker, records) = funded(linear());
        let fees = FlatFee(0);
        locker.suggest_unlock(&admin(), 30, 0, &fees).unwrap();
        locker.start_proposal(&admin(), 40, T0 + WEEK, T0).unwrap();
        let mut b0 = ballot(11);
        let mut b1 = ballot(12);
        locker.cast_vote(&records[0], &mut b0, 300, true, T0 + 1).unwrap();
        locker.cast_vote(&records[1], &mut b1, 6, true, T0 + 1).unwrap();
        locker.end_proposal(&admin(), T0 + 1).unwrap();

        assert_eq!(locker.unlocked_percent, 40);
        assert!(matches!(
            locker.ratify_suggested_unlock(),
            Err(LockerError::NoPendingSuggestion)
        ));
        assert_eq!(locker.unlocked_percent, 40);
    }

    #[test]
    fn recovery_never_touches_the_managed_mint() {
        let (locker, _) = funded(linear());
        assert!(matches!(
            locker.recoverable(&key(3), 500),
            Err(LockerError::CannotRecoverLockedMint)
        ));
        assert!(matches!(
            locker.recoverable(&key(8), 0),
            Err(LockerError::NothingToRecover)
        ));
        assert_eq!(locker.recoverable(&key(8), 500).unwrap(), 500);
    }
}
