use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARY_SEED, DCC_STATE_SEED, INVESTORS_SEED};
use crate::state::{BeneficiaryRecord, DccState, Investors};

/// Appends an investor slot and returns its pid.
pub fn add_investor(ctx: Context<AddInvestor>, wallet: Pubkey, points: u32) -> Result<u32> {
    let dcc_state_key = ctx.accounts.dcc_state.key();
    let owner = ctx.accounts.owner.key();

    let accounts = &mut *ctx.accounts;
    accounts.record.touch(wallet, ctx.bumps.record);
    let st = &accounts.dcc_state;
    let pid = accounts.investors.register(
        st,
        &owner,
        wallet,
        points,
        &st.program_accounts(&dcc_state_key),
        &mut accounts.record,
    )?;

    let investors = &accounts.investors;
    msg!("investor {} added: wallet={}, points={}", pid, wallet, points);

    emit!(InvestorAdded {
        pid,
        wallet,
        points,
        total_points: investors.total_points,
        claimed_cycles: investors.slot(pid)?.claimed_cycles,
    });
    Ok(pid)
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct AddInvestor<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        mut,
        seeds = [INVESTORS_SEED, dcc_state.key().as_ref()],
        bump = investors.bump
    )]
    pub investors: Box<Account<'info, Investors>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + BeneficiaryRecord::INIT_SPACE,
        seeds = [BENEFICIARY_SEED, wallet.as_ref()],
        bump
    )]
    pub record: Account<'info, BeneficiaryRecord>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct InvestorAdded {
    pub pid: u32,
    pub wallet: Pubkey,
    pub points: u32,
    pub total_points: u32,
    pub claimed_cycles: u64,
}
