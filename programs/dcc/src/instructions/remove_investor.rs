use anchor_lang::prelude::*;

use crate::constants::{DCC_STATE_SEED, INVESTORS_SEED};
use crate::state::{BeneficiaryRecord, DccState, Investors};

pub fn remove_investor(ctx: Context<RemoveInvestor>, pid: u32) -> Result<()> {
    let owner = ctx.accounts.owner.key();

    let accounts = &mut *ctx.accounts;
    let previous = accounts.investors.retire(
        &accounts.dcc_state,
        &owner,
        pid,
        accounts.previous_record.as_deref_mut(),
    )?;

    msg!("investor {} removed (was {})", pid, previous);

    emit!(InvestorRemoved {
        pid,
        wallet: previous,
        total_points: accounts.investors.total_points,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RemoveInvestor<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        mut,
        seeds = [INVESTORS_SEED, dcc_state.key().as_ref()],
        bump = investors.bump
    )]
    pub investors: Box<Account<'info, Investors>>,

    #[account(mut)]
    pub previous_record: Option<Account<'info, BeneficiaryRecord>>,

    pub owner: Signer<'info>,
}

#[event]
pub struct InvestorRemoved {
    pub pid: u32,
    pub wallet: Pubkey,
    pub total_points: u32,
}
