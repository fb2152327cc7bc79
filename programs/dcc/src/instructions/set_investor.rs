use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARY_SEED, DCC_STATE_SEED, INVESTORS_SEED};
use crate::state::{BeneficiaryRecord, DccState, Investors};

pub fn set_investor(ctx: Context<SetInvestor>, pid: u32, wallet: Pubkey, points: u32) -> Result<()> {
    let dcc_state_key = ctx.accounts.dcc_state.key();
    let owner = ctx.accounts.owner.key();

    let accounts = &mut *ctx.accounts;
    accounts.new_record.touch(wallet, ctx.bumps.new_record);
    let st = &accounts.dcc_state;
    let change = accounts.investors.reassign_slot(
        st,
        &owner,
        pid,
        wallet,
        points,
        &st.program_accounts(&dcc_state_key),
        &mut accounts.new_record,
        accounts.previous_record.as_deref_mut(),
    )?;

    let investors = &accounts.investors;
    msg!(
        "investor {} set: wallet={}, points={}, total_points={}",
        pid,
        wallet,
        points,
        investors.total_points
    );

    emit!(InvestorUpdated {
        pid,
        previous_wallet: change.previous_wallet,
        wallet,
        points,
        total_points: investors.total_points,
        claimed_cycles: change.claimed_cycles,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(pid: u32, wallet: Pubkey)]
pub struct SetInvestor<'info> {
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
    pub new_record: Account<'info, BeneficiaryRecord>,

    /// Record of the slot's current holder. Omit when the wallet is unchanged
    /// or the slot is empty.
    #[account(mut)]
    pub previous_record: Option<Account<'info, BeneficiaryRecord>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct InvestorUpdated {
    pub pid: u32,
    pub previous_wallet: Pubkey,
    pub wallet: Pubkey,
    pub points: u32,
    pub total_points: u32,
    pub claimed_cycles: u64,
}
