use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::constants::*;
use crate::error::DccError;
use crate::state::{DccState, FixedPool, Investors, LinearPool};

/// Deployment configuration; immutable once the program is initialized.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeParams {
    /// Seconds per cycle (> 0).
    pub cycle_duration: i64,
    pub team_allocation: u64,
    pub team_cycles: u64,
    pub reserve_allocation: u64,
    pub reserve_cycles: u64,
    pub investor_allocation: u64,
    pub investor_cycles: u64,
}

impl Default for InitializeParams {
    fn default() -> Self {
        Self {
            cycle_duration: DEFAULT_CYCLE_DURATION,
            team_allocation: DEFAULT_TEAM_ALLOCATION,
            team_cycles: DEFAULT_TEAM_CYCLES,
            reserve_allocation: DEFAULT_RESERVE_ALLOCATION,
            reserve_cycles: DEFAULT_RESERVE_CYCLES,
            investor_allocation: DEFAULT_INVESTOR_ALLOCATION,
            investor_cycles: DEFAULT_INVESTOR_CYCLES,
        }
    }
}

impl InitializeParams {
    /// Amount minted to the deployer at initialization: whatever the pools leave of MAX_SUPPLY.
    pub fn deployer_share(&self) -> core::result::Result<u64, DccError> {
        if self.cycle_duration <= 0
            || self.team_cycles == 0
            || self.reserve_cycles == 0
            || self.investor_cycles == 0
        {
            return Err(DccError::InvalidConfig);
        }
        let pooled = (self.team_allocation as u128)
            + (self.reserve_allocation as u128)
            + (self.investor_allocation as u128);
        if pooled > MAX_SUPPLY as u128 {
            return Err(DccError::AllocationExceedsSupply);
        }
        Ok(MAX_SUPPLY - pooled as u64)
    }
}

pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let deployer_share = params.deployer_share()?;

    let mint_authority_ai = ctx.accounts.mint_authority.to_account_info();
    let now = Clock::get()?.unix_timestamp;

    let st = &mut ctx.accounts.dcc_state;
    st.owner = ctx.accounts.owner.key();
    st.pending_owner = None;
    st.mint = ctx.accounts.mint.key();
    st.start_ts = now;
    st.cycle_duration = params.cycle_duration;
    st.team = FixedPool::new(LinearPool::new(params.team_allocation, params.team_cycles)?);
    st.reserve = FixedPool::new(LinearPool::new(params.reserve_allocation, params.reserve_cycles)?);
    st.investor_pool = LinearPool::new(params.investor_allocation, params.investor_cycles)?;
    st.bump = ctx.bumps.dcc_state;
    st.mint_bump = ctx.bumps.mint;
    st.mint_authority_bump = ctx.bumps.mint_authority;
    st.treasury_bump = ctx.bumps.treasury;

    let investors = &mut ctx.accounts.investors;
    investors.total_points = 0;
    investors.slots = Vec::new();
    investors.bump = ctx.bumps.investors;

    if deployer_share > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[MINT_AUTHORITY_SEED, &[st.mint_authority_bump]]];
        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.owner_token_account.to_account_info(),
                    authority: mint_authority_ai,
                },
                signer_seeds,
            ),
            deployer_share,
        )?;
    }

    msg!(
        "DCC initialized: start_ts={}, cycle_duration={}, pooled={}, deployer_share={}",
        st.start_ts,
        st.cycle_duration,
        st.pooled_supply()?,
        deployer_share
    );

    emit!(DccInitialized {
        owner: st.owner,
        mint: st.mint,
        mint_authority: ctx.accounts.mint_authority.key(),
        treasury: ctx.accounts.treasury.key(),
        start_ts: st.start_ts,
        cycle_duration: st.cycle_duration,
        team_allocation: params.team_allocation,
        reserve_allocation: params.reserve_allocation,
        investor_allocation: params.investor_allocation,
        deployer_share,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + DccState::INIT_SPACE,
        seeds = [DCC_STATE_SEED],
        bump
    )]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        init,
        payer = owner,
        space = 8 + Investors::INIT_SPACE,
        seeds = [INVESTORS_SEED, dcc_state.key().as_ref()],
        bump
    )]
    pub investors: Box<Account<'info, Investors>>,

    /// CHECK: PDA signer only; mint and freeze authority of `mint`.
    #[account(seeds = [MINT_AUTHORITY_SEED], bump)]
    pub mint_authority: UncheckedAccount<'info>,

    /// CHECK: PDA signer only; holds assets recovered through `execute`.
    #[account(seeds = [TREASURY_SEED], bump)]
    pub treasury: UncheckedAccount<'info>,

    #[account(
        init,
        payer = owner,
        seeds = [MINT_SEED],
        bump,
        mint::decimals = DCC_DECIMALS,
        mint::authority = mint_authority,
        mint::freeze_authority = mint_authority,
    )]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = owner,
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct DccInitialized {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub treasury: Pubkey,
    pub start_ts: i64,
    pub cycle_duration: i64,
    pub team_allocation: u64,
    pub reserve_allocation: u64,
    pub investor_allocation: u64,
    pub deployer_share: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_leaves_nine_percent_to_deployer() {
        let share = InitializeParams::default().deployer_share().unwrap();
        assert_eq!(share, 90_000_000 * ONE_DCC);
    }

    #[test]
    fn rejects_zero_lengths() {
        let mut p = InitializeParams::default();
        p.cycle_duration = 0;
        assert!(matches!(p.deployer_share(), Err(DccError::InvalidConfig)));

        let mut p = InitializeParams::default();
        p.investor_cycles = 0;
        assert!(matches!(p.deployer_share(), Err(DccError::InvalidConfig)));
    }

    #[test]
    fn rejects_allocations_over_supply() {
        let p = InitializeParams {
            team_allocation: MAX_SUPPLY,
            reserve_allocation: 1,
            ..InitializeParams::default()
        };
        assert!(matches!(p.deployer_share(), Err(DccError::AllocationExceedsSupply)));

        let p = InitializeParams {
            team_allocation: MAX_SUPPLY,
            reserve_allocation: 0,
            investor_allocation: 0,
            ..InitializeParams::default()
        };
        assert_eq!(p.deployer_share().unwrap(), 0);
    }
}
