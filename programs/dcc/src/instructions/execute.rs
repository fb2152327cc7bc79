use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::AccountMeta;

use crate::constants::{DCC_STATE_SEED, TREASURY_SEED};
use crate::error::DccError;
use crate::state::DccState;

// NOTE: `execute` handler logic lives in `src/lib.rs` to avoid Anchor
// `Context` lifetime invariance issues when forwarding `remaining_accounts`.

#[derive(Accounts)]
pub struct Execute<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    /// Only signer the program lends to a forwarded call; source of `value`.
    #[account(mut, seeds = [TREASURY_SEED], bump = dcc_state.treasury_bump)]
    pub treasury: SystemAccount<'info>,

    /// CHECK: Any executable program other than this one; checked in-handler.
    #[account(executable)]
    pub target_program: UncheckedAccount<'info>,

    /// CHECK: Receives `value` lamports; required only when `value > 0`.
    #[account(mut)]
    pub value_destination: Option<UncheckedAccount<'info>>,

    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Balance left after debiting `value`; the rent-exempt floor is untouchable.
pub fn debit_above_rent(balance: u64, rent_floor: u64, value: u64) -> core::result::Result<u64, DccError> {
    let spendable = balance.saturating_sub(rent_floor);
    if value > spendable {
        return Err(DccError::InsufficientFunds);
    }
    Ok(balance - value)
}

/// Meta for one forwarded account. The treasury is the only account this
/// program adds a signature for; everything else keeps the caller's flags.
pub fn forwarded_meta(key: Pubkey, is_signer: bool, is_writable: bool, treasury: &Pubkey) -> AccountMeta {
    AccountMeta {
        pubkey: key,
        is_signer: is_signer || key == *treasury,
        is_writable,
    }
}

#[event]
pub struct Executed {
    pub target_program: Pubkey,
    pub treasury: Pubkey,
    pub value: u64,
    pub data_len: u32,
    pub account_count: u32,
}
