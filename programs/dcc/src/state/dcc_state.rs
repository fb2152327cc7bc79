use anchor_lang::prelude::*;

use crate::constants::{INVESTORS_SEED, MINT_AUTHORITY_SEED, NO_INVESTOR_PID, TREASURY_SEED};
use crate::error::DccError;
use crate::state::{check_holder_record, release_holder, BeneficiaryRecord, BeneficiaryRole};
use crate::utils::{cycle, guard, vesting};

/// Fixed pools addressable by a single beneficiary pointer.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolKind {
    Team,
    Reserve,
}

/// Immutable linear schedule plus the running amount paid out of it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct LinearPool {
    pub total_allocation: u64,
    /// Vesting length in cycles (> 0).
    pub total_cycles: u64,
    /// Cumulative amount minted from this pool; never exceeds `total_allocation`.
    pub released: u64,
}

impl LinearPool {
    pub fn new(total_allocation: u64, total_cycles: u64) -> core::result::Result<Self, DccError> {
        if total_cycles == 0 {
            return Err(DccError::InvalidConfig);
        }
        Ok(Self {
            total_allocation,
            total_cycles,
            released: 0,
        })
    }

    pub fn remaining(&self) -> u64 {
        self.total_allocation.saturating_sub(self.released)
    }

    /// Clamp `amount` to what is left and book it as released.
    pub fn release(&mut self, amount: u64) -> core::result::Result<u64, DccError> {
        let amount = amount.min(self.remaining());
        self.released = self
            .released
            .checked_add(amount)
            .ok_or(DccError::MathOverflow)?;
        Ok(amount)
    }
}

/// Outcome of a successful claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolClaim {
    pub amount: u64,
    /// Checkpoint after the claim.
    pub claimed_cycles: u64,
}

/// Team or reserve pool: one schedule, one authorized beneficiary.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FixedPool {
    pub schedule: LinearPool,
    /// `Pubkey::default()` until the owner assigns one.
    pub beneficiary: Pubkey,
    /// Cycles this pool has already paid through.
    pub claimed_cycles: u64,
}

impl FixedPool {
    pub fn new(schedule: LinearPool) -> Self {
        Self {
            schedule,
            beneficiary: Pubkey::default(),
            claimed_cycles: 0,
        }
    }

    pub fn authorize(&self, requester: &Pubkey) -> core::result::Result<(), DccError> {
        if self.beneficiary == Pubkey::default() {
            return Err(DccError::NoBeneficiarySet);
        }
        if *requester != self.beneficiary {
            return Err(DccError::NotAuthorized);
        }
        Ok(())
    }

    pub fn claim(&mut self, requester: &Pubkey, current_cycle: u64) -> core::result::Result<PoolClaim, DccError> {
        self.authorize(requester)?;

        let effective = cycle::effective_cycles(current_cycle, self.schedule.total_cycles);
        if effective <= self.claimed_cycles {
            return Ok(PoolClaim {
                amount: 0,
                claimed_cycles: self.claimed_cycles,
            });
        }

        let owed = vesting::releasable_between(
            self.schedule.total_allocation,
            self.schedule.total_cycles,
            self.claimed_cycles,
            effective,
        )?;
        let amount = self.schedule.release(owed)?;
        self.claimed_cycles = effective;

        Ok(PoolClaim {
            amount,
            claimed_cycles: effective,
        })
    }

    /// Point the pool at `new_beneficiary` whose own history is `holder_claimed_cycles`.
    /// Returns (previous beneficiary, checkpoint the new beneficiary starts from).
    pub fn reassign(&mut self, new_beneficiary: Pubkey, holder_claimed_cycles: u64) -> (Pubkey, u64) {
        let previous = self.beneficiary;
        let checkpoint = self
            .claimed_cycles
            .max(holder_claimed_cycles)
            .min(self.schedule.total_cycles);
        self.beneficiary = new_beneficiary;
        self.claimed_cycles = checkpoint;
        (previous, checkpoint)
    }
}

/// A pool pointer moved from `previous` to a new holder starting at `checkpoint`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeneficiaryChange {
    pub previous: Pubkey,
    pub checkpoint: u64,
}

/// Mint and freeze authority of the DCC mint.
pub fn mint_authority_address() -> Pubkey {
    Pubkey::find_program_address(&[MINT_AUTHORITY_SEED], &crate::ID).0
}

/// Signer of forwarded calls.
pub fn treasury_address() -> Pubkey {
    Pubkey::find_program_address(&[TREASURY_SEED], &crate::ID).0
}

pub fn investors_address(dcc_state: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[INVESTORS_SEED, dcc_state.as_ref()], &crate::ID).0
}

/// Singleton program state PDA.
#[account]
#[derive(InitSpace)]
pub struct DccState {
    pub owner: Pubkey,
    /// Proposed owner awaiting `accept_owner`.
    pub pending_owner: Option<Pubkey>,
    pub mint: Pubkey,
    /// Deployment epoch (Unix seconds).
    pub start_ts: i64,
    pub cycle_duration: i64,
    pub team: FixedPool,
    pub reserve: FixedPool,
    pub investor_pool: LinearPool,
    pub bump: u8,
    pub mint_bump: u8,
    pub mint_authority_bump: u8,
    pub treasury_bump: u8,
}

impl DccState {
    pub fn current_cycle(&self, now_ts: i64) -> core::result::Result<u64, DccError> {
        cycle::current_cycle(now_ts, self.start_ts, self.cycle_duration)
    }

    pub fn pool(&self, kind: PoolKind) -> &FixedPool {
        match kind {
            PoolKind::Team => &self.team,
            PoolKind::Reserve => &self.reserve,
        }
    }

    pub fn pool_mut(&mut self, kind: PoolKind) -> &mut FixedPool {
        match kind {
            PoolKind::Team => &mut self.team,
            PoolKind::Reserve => &mut self.reserve,
        }
    }

    pub fn is_owner(&self, key: &Pubkey) -> bool {
        self.owner == *key
    }

    pub fn propose_owner(&mut self, caller: &Pubkey, new_owner: Pubkey) -> core::result::Result<(), DccError> {
        if !self.is_owner(caller) {
            return Err(DccError::NotOwner);
        }
        if new_owner == Pubkey::default() {
            return Err(DccError::InvalidPubkey);
        }
        self.pending_owner = Some(new_owner);
        Ok(())
    }

    /// Returns the previous owner.
    pub fn accept_owner(&mut self, caller: &Pubkey) -> core::result::Result<Pubkey, DccError> {
        let pending = self.pending_owner.ok_or(DccError::NoPendingOwner)?;
        if pending != *caller {
            return Err(DccError::NotAuthorized);
        }
        let previous = self.owner;
        self.owner = pending;
        self.pending_owner = None;
        Ok(previous)
    }

    pub fn cancel_owner_transfer(&mut self, caller: &Pubkey) -> core::result::Result<(), DccError> {
        if !self.is_owner(caller) {
            return Err(DccError::NotOwner);
        }
        if self.pending_owner.is_none() {
            return Err(DccError::NoPendingOwner);
        }
        self.pending_owner = None;
        Ok(())
    }

    /// Addresses that can sign for this program and so may never be beneficiaries.
    pub fn program_accounts(&self, dcc_state: &Pubkey) -> [Pubkey; 5] {
        [
            *dcc_state,
            investors_address(dcc_state),
            self.mint,
            mint_authority_address(),
            treasury_address(),
        ]
    }

    /// Owner-only pool pointer update behind `set_team_address` / `set_reserve_address`.
    /// `None` when `new_beneficiary` already holds the pool.
    pub fn assign_beneficiary(
        &mut self,
        caller: &Pubkey,
        kind: PoolKind,
        new_beneficiary: Pubkey,
        program_accounts: &[Pubkey],
        new_record: &mut BeneficiaryRecord,
        previous_record: Option<&mut BeneficiaryRecord>,
    ) -> core::result::Result<Option<BeneficiaryChange>, DccError> {
        if !self.is_owner(caller) {
            return Err(DccError::NotOwner);
        }
        guard::check_beneficiary_wallet(&new_beneficiary, program_accounts)?;

        let previous = self.pool(kind).beneficiary;
        if previous == new_beneficiary {
            return Ok(None);
        }
        if new_record.role != BeneficiaryRole::None {
            return Err(DccError::BeneficiaryInUse);
        }
        check_holder_record(&previous, previous_record.as_deref())?;

        release_holder(&previous, previous_record);
        let role = BeneficiaryRole::from(kind);
        let (_, checkpoint) = self
            .pool_mut(kind)
            .reassign(new_beneficiary, new_record.carried_cycles(role));
        new_record.bind(role, NO_INVESTOR_PID, checkpoint)?;

        Ok(Some(BeneficiaryChange { previous, checkpoint }))
    }

    /// Claim behind `claim_team` / `claim_reserve`. Every check runs before any
    /// state changes. Returns the current cycle and the payout to mint.
    pub fn claim_pool(
        &mut self,
        kind: PoolKind,
        caller: &Pubkey,
        now_ts: i64,
        caller_blacklisted: bool,
        record: &mut BeneficiaryRecord,
    ) -> core::result::Result<(u64, PoolClaim), DccError> {
        let current_cycle = self.current_cycle(now_ts)?;
        self.pool(kind).authorize(caller)?;
        guard::check_recipient(caller_blacklisted)?;

        let claim = self.pool_mut(kind).claim(caller, current_cycle)?;
        record.claimed_cycles = claim.claimed_cycles;
        Ok((current_cycle, claim))
    }

    /// Gate for `execute`: owner only, never this program, never an account
    /// that signs for the mint or holds program state.
    pub fn check_execute(
        &self,
        caller: &Pubkey,
        target_program: &Pubkey,
        forwarded: &[Pubkey],
        protected: &[Pubkey],
    ) -> core::result::Result<(), DccError> {
        if !self.is_owner(caller) {
            return Err(DccError::NotOwner);
        }
        if *target_program == crate::ID {
            return Err(DccError::ReentrantCall);
        }
        if forwarded.iter().any(|k| protected.contains(k)) {
            return Err(DccError::ProtectedAccount);
        }
        Ok(())
    }

    /// Sum of all pool allocations.
    pub fn pooled_supply(&self) -> core::result::Result<u64, DccError> {
        self.team
            .schedule
            .total_allocation
            .checked_add(self.reserve.schedule.total_allocation)
            .and_then(|v| v.checked_add(self.investor_pool.total_allocation))
            .ok_or(DccError::MathOverflow)
    }
}
