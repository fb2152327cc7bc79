use anchor_lang::prelude::*;

/// Existence of this PDA flags `wallet` as a disallowed transfer party.
#[account]
#[derive(InitSpace)]
pub struct BlacklistEntry {
    pub wallet: Pubkey,
    pub added_at: i64,
    pub bump: u8,
}
