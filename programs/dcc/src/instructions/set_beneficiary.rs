use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARY_SEED, DCC_STATE_SEED};
use crate::state::{BeneficiaryChange, BeneficiaryRecord, DccState, PoolKind};

pub fn set_beneficiary(ctx: Context<SetBeneficiary>, kind: PoolKind, new_beneficiary: Pubkey) -> Result<()> {
    let dcc_state_key = ctx.accounts.dcc_state.key();
    let owner = ctx.accounts.owner.key();

    let accounts = &mut *ctx.accounts;
    accounts.new_record.touch(new_beneficiary, ctx.bumps.new_record);

    // Program PDAs can sign for the mint or the treasury, so they cannot hold a pool.
    let program_accounts = accounts.dcc_state.program_accounts(&dcc_state_key);
    let change = accounts.dcc_state.assign_beneficiary(
        &owner,
        kind,
        new_beneficiary,
        &program_accounts,
        &mut accounts.new_record,
        accounts.previous_record.as_deref_mut(),
    )?;

    let Some(BeneficiaryChange { previous, checkpoint }) = change else {
        return Ok(());
    };

    msg!(
        "{:?} beneficiary: {} -> {} (checkpoint {})",
        kind,
        previous,
        new_beneficiary,
        checkpoint
    );

    emit!(BeneficiarySet {
        kind,
        previous,
        beneficiary: new_beneficiary,
        claimed_cycles: checkpoint,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(new_beneficiary: Pubkey)]
pub struct SetBeneficiary<'info> {
    #[account(mut, seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + BeneficiaryRecord::INIT_SPACE,
        seeds = [BENEFICIARY_SEED, new_beneficiary.as_ref()],
        bump
    )]
    pub new_record: Account<'info, BeneficiaryRecord>,

    /// Record of the current holder; required once the pool has one.
    #[account(mut)]
    pub previous_record: Option<Account<'info, BeneficiaryRecord>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct BeneficiarySet {
    pub kind: PoolKind,
    pub previous: Pubkey,
    pub beneficiary: Pubkey,
    pub claimed_cycles: u64,
}
