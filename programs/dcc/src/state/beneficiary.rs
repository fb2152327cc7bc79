use anchor_lang::prelude::*;

use crate::constants::NO_INVESTOR_PID;
use crate::error::DccError;
use crate::state::PoolKind;

/// What an address is currently authorized to claim from.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum BeneficiaryRole {
    #[default]
    None,
    Team,
    Reserve,
    Investor,
}

impl From<PoolKind> for BeneficiaryRole {
    fn from(kind: PoolKind) -> Self {
        match kind {
            PoolKind::Team => BeneficiaryRole::Team,
            PoolKind::Reserve => BeneficiaryRole::Reserve,
        }
    }
}

/// Per-address claim history. Keyed by wallet, never closed: a record outlives
/// the role that created it and keeps its counter when the role moves on.
#[account]
#[derive(InitSpace)]
pub struct BeneficiaryRecord {
    pub wallet: Pubkey,
    /// Cycles this address has been paid through in `claimed_pool`.
    pub claimed_cycles: u64,
    /// Pool the counter above belongs to; kept after the role is dropped.
    pub claimed_pool: BeneficiaryRole,
    pub role: BeneficiaryRole,
    /// Investor slot id (1-based) while `role == Investor`.
    pub pid: u32,
    pub bump: u8,
}

impl BeneficiaryRecord {
    /// Fill identity fields of an account created by `init_if_needed`.
    pub fn touch(&mut self, wallet: Pubkey, bump: u8) {
        if self.wallet == Pubkey::default() {
            self.wallet = wallet;
            self.bump = bump;
        }
    }

    /// Take on a role starting from `checkpoint`.
    pub fn bind(&mut self, role: BeneficiaryRole, pid: u32, checkpoint: u64) -> core::result::Result<(), DccError> {
        if self.role != BeneficiaryRole::None {
            return Err(DccError::BeneficiaryInUse);
        }
        self.role = role;
        self.pid = pid;
        self.claimed_pool = role;
        self.claimed_cycles = checkpoint;
        Ok(())
    }

    /// History this address brings into `pool`. Cycles paid from another
    /// pool say nothing about this one.
    pub fn carried_cycles(&self, pool: BeneficiaryRole) -> u64 {
        if self.claimed_pool == pool {
            self.claimed_cycles
        } else {
            0
        }
    }

    /// Drop the role; `claimed_cycles` stays frozen.
    pub fn unbind(&mut self) {
        self.role = BeneficiaryRole::None;
        self.pid = NO_INVESTOR_PID;
    }

    pub fn investor_pid(&self) -> u32 {
        if self.role == BeneficiaryRole::Investor {
            self.pid
        } else {
            NO_INVESTOR_PID
        }
    }

    /// Read a record PDA that may not exist yet. Address must be seed-checked by the caller.
    pub fn load(info: &AccountInfo) -> Result<Option<Self>> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(None);
        }
        let data = info.try_borrow_data()?;
        let record = Self::try_deserialize(&mut &data[..])?;
        Ok(Some(record))
    }
}

/// Check that `record` belongs to `holder`, the address losing a role.
/// An unset holder needs no record.
pub fn check_holder_record(
    holder: &Pubkey,
    record: Option<&BeneficiaryRecord>,
) -> core::result::Result<(), DccError> {
    if *holder == Pubkey::default() {
        return Ok(());
    }
    match record {
        Some(r) if r.wallet == *holder => Ok(()),
        _ => Err(DccError::BeneficiaryRecordMismatch),
    }
}

/// Unbind `holder`'s record; call after `check_holder_record`.
pub fn release_holder(holder: &Pubkey, record: Option<&mut BeneficiaryRecord>) {
    if *holder == Pubkey::default() {
        return;
    }
    if let Some(r) = record {
        r.unbind();
    }
}
