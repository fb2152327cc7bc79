use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::constants::{BENEFICIARY_SEED, BLACKLIST_SEED, DCC_STATE_SEED, MINT_AUTHORITY_SEED, MINT_SEED};
use crate::error::DccError;
use crate::state::{BeneficiaryRecord, DccState, PoolKind};
use crate::utils::guard;

pub fn claim_pool(ctx: Context<ClaimPool>, kind: PoolKind) -> Result<()> {
    // Capture AccountInfos before taking mutable borrows.
    let mint_authority_ai = ctx.accounts.mint_authority.to_account_info();
    let beneficiary = ctx.accounts.beneficiary.key();
    let blacklisted = guard::is_blacklisted(&ctx.accounts.beneficiary_blacklist);
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut *ctx.accounts;
    accounts.record.touch(beneficiary, ctx.bumps.record);
    let st = &mut accounts.dcc_state;
    let (current_cycle, claim) = st.claim_pool(kind, &beneficiary, now, blacklisted, &mut accounts.record)?;

    if claim.amount == 0 {
        msg!("{:?} claim at cycle {}: nothing unlocked", kind, current_cycle);
        return Ok(());
    }

    let signer_seeds: &[&[&[u8]]] = &[&[MINT_AUTHORITY_SEED, &[st.mint_authority_bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            MintTo {
                mint: accounts.mint.to_account_info(),
                to: accounts.beneficiary_token_account.to_account_info(),
                authority: mint_authority_ai,
            },
            signer_seeds,
        ),
        claim.amount,
    )?;

    emit!(PoolClaimed {
        kind,
        beneficiary,
        cycle: current_cycle,
        amount: claim.amount,
        claimed_cycles: claim.claimed_cycles,
        released_total: st.pool(kind).schedule.released,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimPool<'info> {
    #[account(mut, seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        init_if_needed,
        payer = beneficiary,
        space = 8 + BeneficiaryRecord::INIT_SPACE,
        seeds = [BENEFICIARY_SEED, beneficiary.key().as_ref()],
        bump
    )]
    pub record: Account<'info, BeneficiaryRecord>,

    /// CHECK: PDA address is seed-checked; membership is its existence.
    #[account(seeds = [BLACKLIST_SEED, beneficiary.key().as_ref()], bump)]
    pub beneficiary_blacklist: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [MINT_SEED],
        bump = dcc_state.mint_bump,
        constraint = mint.key() == dcc_state.mint @ DccError::InvalidTokenMint,
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA signer only.
    #[account(seeds = [MINT_AUTHORITY_SEED], bump = dcc_state.mint_authority_bump)]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = beneficiary,
        associated_token::mint = mint,
        associated_token::authority = beneficiary,
    )]
    pub beneficiary_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct PoolClaimed {
    pub kind: PoolKind,
    pub beneficiary: Pubkey,
    pub cycle: u64,
    pub amount: u64,
    pub claimed_cycles: u64,
    pub released_total: u64,
}
