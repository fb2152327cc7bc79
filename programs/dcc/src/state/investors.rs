use anchor_lang::prelude::*;

use crate::constants::{MAX_INVESTORS, MAX_POINTS, NO_INVESTOR_PID};
use crate::error::DccError;
use crate::state::{check_holder_record, release_holder, BeneficiaryRecord, BeneficiaryRole, DccState, LinearPool, PoolClaim};
use crate::utils::{cycle, guard, vesting};

/// A single point-weighted claim on the investor pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct InvestorSlot {
    /// `Pubkey::default()` once removed.
    pub wallet: Pubkey,
    pub points: u32,
    /// Cycles this slot has already paid through; kept across holder changes.
    pub claimed_cycles: u64,
}

impl InvestorSlot {
    pub fn is_active(&self) -> bool {
        self.points > 0 && self.wallet != Pubkey::default()
    }
}

/// Result of handing a slot to a (possibly) different wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotChange {
    /// Holder before the change, `Pubkey::default()` if the slot was empty.
    pub previous_wallet: Pubkey,
    pub wallet_changed: bool,
    pub claimed_cycles: u64,
}

/// PDA holding every investor slot. Slot ids (`pid`) are 1-based; 0 means "none".
#[account]
#[derive(InitSpace)]
pub struct Investors {
    /// Running sum of `points` over all slots (<= MAX_POINTS).
    pub total_points: u32,
    #[max_len(MAX_INVESTORS)]
    pub slots: Vec<InvestorSlot>,
    pub bump: u8,
}

impl Investors {
    fn index(&self, pid: u32) -> core::result::Result<usize, DccError> {
        let idx = (pid as usize).checked_sub(1).ok_or(DccError::InvestorNotFound)?;
        if idx >= self.slots.len() {
            return Err(DccError::InvestorNotFound);
        }
        Ok(idx)
    }

    pub fn slot(&self, pid: u32) -> core::result::Result<&InvestorSlot, DccError> {
        let idx = self.index(pid)?;
        Ok(&self.slots[idx])
    }

    fn checked_total(others: u32, points: u32) -> core::result::Result<u32, DccError> {
        let total = others.checked_add(points).ok_or(DccError::MathOverflow)?;
        if total > MAX_POINTS {
            return Err(DccError::PointCapExceeded);
        }
        Ok(total)
    }

    /// Append a slot; returns its pid.
    pub fn add(&mut self, wallet: Pubkey, points: u32, checkpoint: u64) -> core::result::Result<u32, DccError> {
        if wallet == Pubkey::default() {
            return Err(DccError::InvalidPubkey);
        }
        if points == 0 {
            return Err(DccError::InvalidPoints);
        }
        let total = Self::checked_total(self.total_points, points)?;
        if self.slots.len() >= MAX_INVESTORS {
            return Err(DccError::InvestorListFull);
        }

        self.slots.push(InvestorSlot {
            wallet,
            points,
            claimed_cycles: checkpoint,
        });
        self.total_points = total;
        Ok(self.slots.len() as u32)
    }

    /// Replace a slot's holder and weight. A new holder resumes from
    /// max(slot checkpoint, its own `holder_claimed_cycles`).
    pub fn set(
        &mut self,
        pid: u32,
        wallet: Pubkey,
        points: u32,
        holder_claimed_cycles: u64,
    ) -> core::result::Result<SlotChange, DccError> {
        if wallet == Pubkey::default() {
            return Err(DccError::InvalidPubkey);
        }
        if points == 0 {
            return Err(DccError::InvalidPoints);
        }
        let idx = self.index(pid)?;
        let others = self.total_points - self.slots[idx].points;
        let total = Self::checked_total(others, points)?;

        let slot = &mut self.slots[idx];
        let previous_wallet = slot.wallet;
        let wallet_changed = previous_wallet != wallet;
        if wallet_changed {
            slot.claimed_cycles = slot.claimed_cycles.max(holder_claimed_cycles);
        }
        slot.wallet = wallet;
        slot.points = points;
        self.total_points = total;

        Ok(SlotChange {
            previous_wallet,
            wallet_changed,
            claimed_cycles: slot.claimed_cycles,
        })
    }

    /// Zero a slot; returns the wallet that held it.
    pub fn remove(&mut self, pid: u32) -> core::result::Result<Pubkey, DccError> {
        let idx = self.index(pid)?;
        let slot = &mut self.slots[idx];
        let previous = slot.wallet;
        let points = slot.points;
        slot.wallet = Pubkey::default();
        slot.points = 0;
        self.total_points -= points;
        Ok(previous)
    }

    /// `requester` holds slot `pid` with nonzero points.
    pub fn authorize(&self, pid: u32, requester: &Pubkey) -> core::result::Result<usize, DccError> {
        let idx = self.index(pid).map_err(|_| DccError::NoInvestor)?;
        let slot = &self.slots[idx];
        if !slot.is_active() || slot.wallet != *requester {
            return Err(DccError::NoInvestor);
        }
        Ok(idx)
    }

    /// Pay `requester` its current-point share of the cycles unlocked since the slot checkpoint.
    pub fn claim(
        &mut self,
        pid: u32,
        requester: &Pubkey,
        current_cycle: u64,
        pool: &mut LinearPool,
    ) -> core::result::Result<PoolClaim, DccError> {
        let idx = self.authorize(pid, requester)?;
        let slot = &mut self.slots[idx];

        let effective = cycle::effective_cycles(current_cycle, pool.total_cycles);
        if effective <= slot.claimed_cycles {
            return Ok(PoolClaim {
                amount: 0,
                claimed_cycles: slot.claimed_cycles,
            });
        }

        let owed = vesting::investor_releasable(
            pool.total_allocation,
            pool.total_cycles,
            slot.claimed_cycles,
            effective,
            slot.points,
        )?;
        let amount = pool.release(owed)?;
        slot.claimed_cycles = effective;

        Ok(PoolClaim {
            amount,
            claimed_cycles: effective,
        })
    }

    /// Owner-only `add_investor`: append a slot for `wallet` and bind its record.
    pub fn register(
        &mut self,
        st: &DccState,
        caller: &Pubkey,
        wallet: Pubkey,
        points: u32,
        program_accounts: &[Pubkey],
        record: &mut BeneficiaryRecord,
    ) -> core::result::Result<u32, DccError> {
        if !st.is_owner(caller) {
            return Err(DccError::NotOwner);
        }
        guard::check_beneficiary_wallet(&wallet, program_accounts)?;
        if record.role != BeneficiaryRole::None {
            return Err(DccError::BeneficiaryInUse);
        }

        let checkpoint = record
            .carried_cycles(BeneficiaryRole::Investor)
            .min(st.investor_pool.total_cycles);
        let pid = self.add(wallet, points, checkpoint)?;
        record.bind(BeneficiaryRole::Investor, pid, checkpoint)?;
        Ok(pid)
    }

    /// Owner-only `set_investor`. A changed wallet releases the previous
    /// holder's record and binds the new one.
    #[allow(clippy::too_many_arguments)]
    pub fn reassign_slot(
        &mut self,
        st: &DccState,
        caller: &Pubkey,
        pid: u32,
        wallet: Pubkey,
        points: u32,
        program_accounts: &[Pubkey],
        new_record: &mut BeneficiaryRecord,
        previous_record: Option<&mut BeneficiaryRecord>,
    ) -> core::result::Result<SlotChange, DccError> {
        if !st.is_owner(caller) {
            return Err(DccError::NotOwner);
        }
        guard::check_beneficiary_wallet(&wallet, program_accounts)?;

        let holder = self.slot(pid)?.wallet;
        let wallet_changed = holder != wallet;
        if wallet_changed {
            if new_record.role != BeneficiaryRole::None {
                return Err(DccError::BeneficiaryInUse);
            }
            check_holder_record(&holder, previous_record.as_deref())?;
        }

        let carried = new_record
            .carried_cycles(BeneficiaryRole::Investor)
            .min(st.investor_pool.total_cycles);
        let change = self.set(pid, wallet, points, carried)?;
        if change.wallet_changed {
            release_holder(&holder, previous_record);
            new_record.bind(BeneficiaryRole::Investor, pid, change.claimed_cycles)?;
        }
        Ok(change)
    }

    /// Owner-only `remove_investor`; returns the released wallet.
    pub fn retire(
        &mut self,
        st: &DccState,
        caller: &Pubkey,
        pid: u32,
        previous_record: Option<&mut BeneficiaryRecord>,
    ) -> core::result::Result<Pubkey, DccError> {
        if !st.is_owner(caller) {
            return Err(DccError::NotOwner);
        }
        let holder = self.slot(pid)?.wallet;
        check_holder_record(&holder, previous_record.as_deref())?;

        let previous = self.remove(pid)?;
        release_holder(&previous, previous_record);
        Ok(previous)
    }

    /// `claim_investor` for the slot bound to `record`. Every check runs
    /// before any state changes. Returns (current cycle, pid, payout).
    pub fn claim_for(
        &mut self,
        st: &mut DccState,
        caller: &Pubkey,
        now_ts: i64,
        caller_blacklisted: bool,
        record: &mut BeneficiaryRecord,
    ) -> core::result::Result<(u64, u32, PoolClaim), DccError> {
        let pid = record.investor_pid();
        if pid == NO_INVESTOR_PID {
            return Err(DccError::NoInvestor);
        }
        let current_cycle = st.current_cycle(now_ts)?;
        self.authorize(pid, caller)?;
        guard::check_recipient(caller_blacklisted)?;

        let claim = self.claim(pid, caller, current_cycle, &mut st.investor_pool)?;
        record.claimed_cycles = claim.claimed_cycles;
        Ok((current_cycle, pid, claim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ONE_DCC;

    fn registry() -> Investors {
        Investors {
            total_points: 0,
            slots: Vec::new(),
            bump: 0,
        }
    }

    fn investor_pool() -> LinearPool {
        LinearPool::new(330_000_000 * ONE_DCC, 36).unwrap()
    }

    #[test]
    fn add_assigns_one_based_pids() {
        let mut inv = registry();
        assert_eq!(inv.add(Pubkey::new_unique(), 1_000, 0).unwrap(), 1);
        assert_eq!(inv.add(Pubkey::new_unique(), 1_000, 0).unwrap(), 2);
        assert_eq!(inv.total_points, 2_000);
        assert!(matches!(inv.slot(0), Err(DccError::InvestorNotFound)));
        assert!(matches!(inv.slot(3), Err(DccError::InvestorNotFound)));
    }

    #[test]
    fn add_rejects_zero_points_and_default_wallet() {
        let mut inv = registry();
        assert!(matches!(inv.add(Pubkey::new_unique(), 0, 0), Err(DccError::InvalidPoints)));
        assert!(matches!(inv.add(Pubkey::default(), 10, 0), Err(DccError::InvalidPubkey)));
        assert!(inv.slots.is_empty());
    }

    #[test]
    fn point_cap_is_enforced_and_state_unchanged() {
        let mut inv = registry();
        inv.add(Pubkey::new_unique(), 1_000, 0).unwrap();
        inv.add(Pubkey::new_unique(), 1_000, 0).unwrap();

        assert!(matches!(
            inv.add(Pubkey::new_unique(), 8_001, 0),
            Err(DccError::PointCapExceeded)
        ));
        assert!(matches!(
            inv.set(1, Pubkey::new_unique(), 9_001, 0),
            Err(DccError::PointCapExceeded)
        ));
        assert_eq!(inv.total_points, 2_000);
        assert_eq!(inv.slots.len(), 2);

        inv.add(Pubkey::new_unique(), 8_000, 0).unwrap();
        assert_eq!(inv.total_points, 10_000);

        let third = inv.slot(3).unwrap().wallet;
        inv.set(3, third, 500, 0).unwrap();
        assert_eq!(inv.total_points, 2_500);
        inv.set(3, third, 8_000, 0).unwrap();
        assert_eq!(inv.total_points, 10_000);
    }

    #[test]
    fn list_capacity_is_bounded() {
        let mut inv = registry();
        for _ in 0..MAX_INVESTORS {
            inv.add(Pubkey::new_unique(), 1, 0).unwrap();
        }
        assert!(matches!(inv.add(Pubkey::new_unique(), 1, 0), Err(DccError::InvestorListFull)));
    }

    #[test]
    fn remove_clears_slot_but_keeps_checkpoint() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        inv.add(a, 4_000, 0).unwrap();
        inv.claim(1, &a, 6, &mut pool).unwrap();

        assert_eq!(inv.remove(1).unwrap(), a);
        assert_eq!(inv.total_points, 0);
        let slot = inv.slot(1).unwrap();
        assert!(!slot.is_active());
        assert_eq!(slot.claimed_cycles, 6);
        assert!(matches!(inv.claim(1, &a, 12, &mut pool), Err(DccError::NoInvestor)));
    }

    #[test]
    fn claim_requires_slot_holder() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        inv.add(a, 1_000, 0).unwrap();
        let stranger = Pubkey::new_unique();
        assert!(matches!(inv.claim(1, &stranger, 12, &mut pool), Err(DccError::NoInvestor)));
        assert!(matches!(inv.claim(0, &a, 12, &mut pool), Err(DccError::NoInvestor)));
        assert!(matches!(inv.claim(9, &a, 12, &mut pool), Err(DccError::NoInvestor)));
    }

    #[test]
    fn equal_points_split_unlock_by_max_points() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        inv.add(a, 1_000, 0).unwrap();
        inv.add(b, 1_000, 0).unwrap();

        assert_eq!(inv.claim(1, &a, 0, &mut pool).unwrap().amount, 0);
        assert_eq!(inv.claim(1, &a, 12, &mut pool).unwrap().amount, 11_000_000 * ONE_DCC);
        assert_eq!(inv.claim(2, &b, 12, &mut pool).unwrap().amount, 11_000_000 * ONE_DCC);
        assert_eq!(inv.claim(2, &b, 12, &mut pool).unwrap().amount, 0);
        assert_eq!(pool.released, 22_000_000 * ONE_DCC);
    }

    #[test]
    fn new_holder_resumes_slot_checkpoint() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();
        inv.add(a, 1_000, 0).unwrap();
        inv.add(b, 1_000, 0).unwrap();
        inv.claim(1, &a, 12, &mut pool).unwrap();
        inv.claim(2, &b, 12, &mut pool).unwrap();

        let change = inv.set(1, c, 1_000, 0).unwrap();
        assert_eq!(change.previous_wallet, a);
        assert!(change.wallet_changed);
        assert_eq!(change.claimed_cycles, 12);
        assert!(matches!(inv.claim(1, &a, 13, &mut pool), Err(DccError::NoInvestor)));

        // B claims inside cycle 13; C's claim lands after the next boundary.
        let b_paid = inv.claim(2, &b, 13, &mut pool).unwrap().amount;
        assert_eq!(b_paid, 916_666_666_666_666);
        let c_paid = inv.claim(1, &c, 14, &mut pool).unwrap().amount;
        assert_eq!(c_paid, 1_833_333_333_333_333);
    }

    #[test]
    fn point_changes_reweight_future_increments() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        inv.add(a, 1_000, 0).unwrap();
        inv.claim(1, &a, 12, &mut pool).unwrap();
        inv.set(1, a, 2_000, 0).unwrap();
        let paid = inv.claim(1, &a, 13, &mut pool).unwrap().amount;
        assert_eq!(paid, 23_833_333_333_333_333 - 22_000_000 * ONE_DCC);
    }

    #[test]
    fn same_holder_update_keeps_checkpoint() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        inv.add(a, 1_000, 0).unwrap();
        inv.claim(1, &a, 12, &mut pool).unwrap();
        let change = inv.set(1, a, 3_000, 40).unwrap();
        assert!(!change.wallet_changed);
        assert_eq!(change.claimed_cycles, 12);
    }

    #[test]
    fn full_vesting_pays_exact_shares() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        inv.add(a, 5_000, 0).unwrap();
        inv.add(b, 5_000, 0).unwrap();
        assert_eq!(inv.claim(1, &a, 49, &mut pool).unwrap().amount, 165_000_000 * ONE_DCC);
        assert_eq!(inv.claim(2, &b, 49, &mut pool).unwrap().amount, 165_000_000 * ONE_DCC);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn churn_cannot_drain_past_allocation() {
        let mut inv = registry();
        let mut pool = investor_pool();
        let a = Pubkey::new_unique();
        inv.add(a, MAX_POINTS, 0).unwrap();
        inv.claim(1, &a, 36, &mut pool).unwrap();
        inv.remove(1).unwrap();

        // A fresh investor in a fresh slot starts from zero, but the pool is empty.
        let b = Pubkey::new_unique();
        inv.add(b, MAX_POINTS, 0).unwrap();
        assert_eq!(inv.claim(2, &b, 36, &mut pool).unwrap().amount, 0);
        assert_eq!(pool.released, pool.total_allocation);
    }

    fn owned_state(owner: Pubkey) -> DccState {
        DccState {
            owner,
            pending_owner: None,
            mint: Pubkey::new_unique(),
            start_ts: 0,
            cycle_duration: 10,
            team: crate::state::FixedPool::new(LinearPool::new(250_000_000 * ONE_DCC, 48).unwrap()),
            reserve: crate::state::FixedPool::new(LinearPool::new(330_000_000 * ONE_DCC, 36).unwrap()),
            investor_pool: investor_pool(),
            bump: 255,
            mint_bump: 254,
            mint_authority_bump: 253,
            treasury_bump: 252,
        }
    }

    fn fresh_record(wallet: Pubkey) -> BeneficiaryRecord {
        let mut r = BeneficiaryRecord {
            wallet: Pubkey::default(),
            claimed_cycles: 0,
            claimed_pool: BeneficiaryRole::None,
            role: BeneficiaryRole::None,
            pid: NO_INVESTOR_PID,
            bump: 0,
        };
        r.touch(wallet, 1);
        r
    }

    #[test]
    fn register_is_owner_only_and_binds_record() {
        let owner = Pubkey::new_unique();
        let st = owned_state(owner);
        let mut inv = registry();
        let a = Pubkey::new_unique();
        let mut rec = fresh_record(a);

        assert!(matches!(
            inv.register(&st, &a, a, 1_000, &[], &mut rec),
            Err(DccError::NotOwner)
        ));
        assert!(matches!(
            inv.register(&st, &owner, st.mint, 1_000, &[st.mint], &mut rec),
            Err(DccError::InvalidBeneficiary)
        ));
        assert_eq!(inv.register(&st, &owner, a, 1_000, &[], &mut rec).unwrap(), 1);
        assert_eq!(rec.investor_pid(), 1);
        assert!(matches!(
            inv.register(&st, &owner, a, 1_000, &[], &mut rec),
            Err(DccError::BeneficiaryInUse)
        ));
        assert_eq!(inv.total_points, 1_000);
    }

    #[test]
    fn register_ignores_history_from_other_pools() {
        let owner = Pubkey::new_unique();
        let st = owned_state(owner);
        let mut inv = registry();
        let a = Pubkey::new_unique();
        let mut rec = fresh_record(a);
        rec.bind(BeneficiaryRole::Team, NO_INVESTOR_PID, 30).unwrap();
        rec.unbind();

        let pid = inv.register(&st, &owner, a, 1_000, &[], &mut rec).unwrap();
        assert_eq!(inv.slot(pid).unwrap().claimed_cycles, 0);
    }

    #[test]
    fn reassign_slot_checks_outgoing_record_before_changing_anything() {
        let owner = Pubkey::new_unique();
        let st = owned_state(owner);
        let mut inv = registry();
        let a = Pubkey::new_unique();
        let c = Pubkey::new_unique();
        let mut rec_a = fresh_record(a);
        let mut rec_c = fresh_record(c);
        let mut stranger = fresh_record(Pubkey::new_unique());
        inv.register(&st, &owner, a, 1_000, &[], &mut rec_a).unwrap();

        assert!(matches!(
            inv.reassign_slot(&st, &owner, 1, c, 1_000, &[], &mut rec_c, None),
            Err(DccError::BeneficiaryRecordMismatch)
        ));
        assert!(matches!(
            inv.reassign_slot(&st, &owner, 1, c, 1_000, &[], &mut rec_c, Some(&mut stranger)),
            Err(DccError::BeneficiaryRecordMismatch)
        ));
        assert_eq!(inv.slot(1).unwrap().wallet, a);
        assert_eq!(rec_c.role, BeneficiaryRole::None);

        let change = inv
            .reassign_slot(&st, &owner, 1, c, 1_000, &[], &mut rec_c, Some(&mut rec_a))
            .unwrap();
        assert_eq!(change.previous_wallet, a);
        assert_eq!(rec_a.investor_pid(), NO_INVESTOR_PID);
        assert_eq!(rec_c.investor_pid(), 1);
    }

    #[test]
    fn reassign_slot_same_wallet_needs_no_previous_record() {
        let owner = Pubkey::new_unique();
        let st = owned_state(owner);
        let mut inv = registry();
        let a = Pubkey::new_unique();
        let mut rec_a = fresh_record(a);
        inv.register(&st, &owner, a, 1_000, &[], &mut rec_a).unwrap();

        let change = inv
            .reassign_slot(&st, &owner, 1, a, 3_000, &[], &mut rec_a, None)
            .unwrap();
        assert!(!change.wallet_changed);
        assert_eq!(inv.total_points, 3_000);
        assert_eq!(rec_a.investor_pid(), 1);
    }

    #[test]
    fn retire_requires_matching_record() {
        let owner = Pubkey::new_unique();
        let st = owned_state(owner);
        let mut inv = registry();
        let a = Pubkey::new_unique();
        let mut rec_a = fresh_record(a);
        inv.register(&st, &owner, a, 1_000, &[], &mut rec_a).unwrap();

        assert!(matches!(inv.retire(&st, &a, 1, Some(&mut rec_a)), Err(DccError::NotOwner)));
        assert!(matches!(
            inv.retire(&st, &owner, 1, None),
            Err(DccError::BeneficiaryRecordMismatch)
        ));
        assert_eq!(inv.total_points, 1_000);

        assert_eq!(inv.retire(&st, &owner, 1, Some(&mut rec_a)).unwrap(), a);
        assert_eq!(rec_a.role, BeneficiaryRole::None);
        // Empty slot: nothing left to release.
        assert_eq!(inv.retire(&st, &owner, 1, None).unwrap(), Pubkey::default());
    }

    #[test]
    fn blacklisted_claim_changes_nothing() {
        let owner = Pubkey::new_unique();
        let mut st = owned_state(owner);
        let mut inv = registry();
        let a = Pubkey::new_unique();
        let mut rec_a = fresh_record(a);
        inv.register(&st, &owner, a, 1_000, &[], &mut rec_a).unwrap();

        assert!(matches!(
            inv.claim_for(&mut st, &a, 120, true, &mut rec_a),
            Err(DccError::BlacklistedRecipient)
        ));
        assert_eq!(st.investor_pool.released, 0);
        assert_eq!(inv.slot(1).unwrap().claimed_cycles, 0);
        assert_eq!(rec_a.claimed_cycles, 0);

        let (cycle, pid, claim) = inv.claim_for(&mut st, &a, 120, false, &mut rec_a).unwrap();
        assert_eq!((cycle, pid), (12, 1));
        assert_eq!(claim.amount, 11_000_000 * ONE_DCC);
        assert_eq!(rec_a.claimed_cycles, 12);
    }
}
