use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::constants::{BENEFICIARY_SEED, BLACKLIST_SEED, DCC_STATE_SEED, INVESTORS_SEED, MINT_AUTHORITY_SEED, MINT_SEED};
use crate::error::DccError;
use crate::state::{BeneficiaryRecord, DccState, Investors};
use crate::utils::guard;

pub fn claim_investor(ctx: Context<ClaimInvestor>) -> Result<()> {
    let mint_authority_ai = ctx.accounts.mint_authority.to_account_info();
    let investor = ctx.accounts.investor.key();
    let blacklisted = guard::is_blacklisted(&ctx.accounts.investor_blacklist);
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut *ctx.accounts;
    accounts.record.touch(investor, ctx.bumps.record);
    let (current_cycle, pid, claim) = accounts.investors.claim_for(
        &mut accounts.dcc_state,
        &investor,
        now,
        blacklisted,
        &mut accounts.record,
    )?;

    if claim.amount == 0 {
        msg!("investor {} claim at cycle {}: nothing unlocked", pid, current_cycle);
        return Ok(());
    }

    let signer_seeds: &[&[&[u8]]] = &[&[MINT_AUTHORITY_SEED, &[accounts.dcc_state.mint_authority_bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            MintTo {
                mint: accounts.mint.to_account_info(),
                to: accounts.investor_token_account.to_account_info(),
                authority: mint_authority_ai,
            },
            signer_seeds,
        ),
        claim.amount,
    )?;

    emit!(InvestorClaimed {
        pid,
        investor,
        cycle: current_cycle,
        points: accounts.investors.slot(pid)?.points,
        amount: claim.amount,
        claimed_cycles: claim.claimed_cycles,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimInvestor<'info> {
    #[account(mut, seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        mut,
        seeds = [INVESTORS_SEED, dcc_state.key().as_ref()],
        bump = investors.bump
    )]
    pub investors: Box<Account<'info, Investors>>,

    #[account(
        init_if_needed,
        payer = investor,
        space = 8 + BeneficiaryRecord::INIT_SPACE,
        seeds = [BENEFICIARY_SEED, investor.key().as_ref()],
        bump
    )]
    pub record: Account<'info, BeneficiaryRecord>,

    /// CHECK: PDA address is seed-checked; membership is its existence.
    #[account(seeds = [BLACKLIST_SEED, investor.key().as_ref()], bump)]
    pub investor_blacklist: UncheckedAccount<'info>,

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
        payer = investor,
        associated_token::mint = mint,
        associated_token::authority = investor,
    )]
    pub investor_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct InvestorClaimed {
    pub pid: u32,
    pub investor: Pubkey,
    pub cycle: u64,
    pub points: u32,
    pub amount: u64,
    pub claimed_cycles: u64,
}
