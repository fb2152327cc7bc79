use anchor_lang::prelude::*;

use crate::constants::DCC_STATE_SEED;
use crate::state::DccState;

pub fn propose_owner(ctx: Context<ManageOwner>, new_owner: Pubkey) -> Result<()> {
    let st = &mut ctx.accounts.dcc_state;
    st.propose_owner(&ctx.accounts.owner.key(), new_owner)?;

    msg!("owner transfer proposed: {} -> {}", st.owner, new_owner);
    emit!(OwnerTransferProposed {
        owner: st.owner,
        pending_owner: new_owner,
    });
    Ok(())
}

pub fn cancel_owner_transfer(ctx: Context<ManageOwner>) -> Result<()> {
    let st = &mut ctx.accounts.dcc_state;
    let cancelled = st.pending_owner.unwrap_or_default();
    st.cancel_owner_transfer(&ctx.accounts.owner.key())?;

    emit!(OwnerTransferCancelled {
        owner: st.owner,
        cancelled,
    });
    Ok(())
}

pub fn accept_owner(ctx: Context<AcceptOwner>) -> Result<()> {
    let st = &mut ctx.accounts.dcc_state;
    let previous = st.accept_owner(&ctx.accounts.new_owner.key())?;

    msg!("owner transferred: {} -> {}", previous, st.owner);
    emit!(OwnerTransferred {
        previous,
        owner: st.owner,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ManageOwner<'info> {
    #[account(mut, seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    pub owner: Signer<'info>,
}

#[derive(Accounts)]
pub struct AcceptOwner<'info> {
    #[account(mut, seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    pub new_owner: Signer<'info>,
}

#[event]
pub struct OwnerTransferProposed {
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
}

#[event]
pub struct OwnerTransferCancelled {
    pub owner: Pubkey,
    pub cancelled: Pubkey,
}

#[event]
pub struct OwnerTransferred {
    pub previous: Pubkey,
    pub owner: Pubkey,
}
