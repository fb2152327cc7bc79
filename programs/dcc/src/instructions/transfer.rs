use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{BLACKLIST_SEED, DCC_STATE_SEED};
use crate::error::DccError;
use crate::state::DccState;
use crate::utils::guard;

/// Blacklist-checked DCC transfer. With `delegated` the signer acts as the
/// SPL delegate of `from`, otherwise as its owner.
pub fn guarded_transfer(ctx: Context<GuardedTransfer>, amount: u64, delegated: bool) -> Result<()> {
    let from = &ctx.accounts.from;
    let authority = ctx.accounts.authority.key();
    guard::authorize_transfer(&guard::TransferCheck {
        amount,
        authority,
        source_owner: from.owner,
        source_delegate: Option::<Pubkey>::from(from.delegate),
        delegated_amount: from.delegated_amount,
        source_balance: from.amount,
        sender_blacklisted: guard::is_blacklisted(&ctx.accounts.sender_blacklist),
        recipient_blacklisted: guard::is_blacklisted(&ctx.accounts.recipient_blacklist),
        delegated,
    })?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.from.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(GuardedTransferExecuted {
        from_owner: ctx.accounts.from.owner,
        to_owner: ctx.accounts.to.owner,
        authority,
        amount,
        delegated,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct GuardedTransfer<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        mut,
        constraint = from.mint == dcc_state.mint @ DccError::InvalidTokenMint,
    )]
    pub from: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = to.mint == dcc_state.mint @ DccError::InvalidTokenMint,
    )]
    pub to: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA address is seed-checked; membership is its existence.
    #[account(seeds = [BLACKLIST_SEED, from.owner.as_ref()], bump)]
    pub sender_blacklist: UncheckedAccount<'info>,

    /// CHECK: PDA address is seed-checked; membership is its existence.
    #[account(seeds = [BLACKLIST_SEED, to.owner.as_ref()], bump)]
    pub recipient_blacklist: UncheckedAccount<'info>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct GuardedTransferExecuted {
    pub from_owner: Pubkey,
    pub to_owner: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub delegated: bool,
}
