//! Read-only entry points. Values come back through Anchor return data.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{BeneficiaryRecord, DccState, Investors, PoolKind};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub max_supply: u64,
    pub mint: Pubkey,
}

impl TokenInfo {
    pub fn for_mint(mint: Pubkey) -> Self {
        Self {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            decimals: DCC_DECIMALS,
            max_supply: MAX_SUPPLY,
            mint,
        }
    }
}

pub fn get_cycle(ctx: Context<ReadState>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.dcc_state.current_cycle(now)?)
}

pub fn beneficiary_address(ctx: Context<ReadState>, kind: PoolKind) -> Result<Pubkey> {
    Ok(ctx.accounts.dcc_state.pool(kind).beneficiary)
}

pub fn token_info(ctx: Context<ReadState>) -> Result<TokenInfo> {
    Ok(TokenInfo::for_mint(ctx.accounts.dcc_state.mint))
}

/// Cycles `wallet` has been paid through; 0 for unknown addresses.
pub fn claimed(ctx: Context<ReadBeneficiary>, _wallet: Pubkey) -> Result<u64> {
    let record = BeneficiaryRecord::load(&ctx.accounts.record)?;
    Ok(record.map_or(0, |r| r.claimed_cycles))
}

/// Investor slot held by `wallet`, `NO_INVESTOR_PID` if none.
pub fn lp_of_pid(ctx: Context<ReadBeneficiary>, _wallet: Pubkey) -> Result<u32> {
    let record = BeneficiaryRecord::load(&ctx.accounts.record)?;
    Ok(record.map_or(NO_INVESTOR_PID, |r| r.investor_pid()))
}

pub fn investor_total_point(ctx: Context<ReadInvestors>) -> Result<u32> {
    Ok(ctx.accounts.investors.total_points)
}

#[derive(Accounts)]
pub struct ReadState<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct ReadBeneficiary<'info> {
    /// CHECK: PDA address is seed-checked; may not exist yet.
    #[account(seeds = [BENEFICIARY_SEED, wallet.as_ref()], bump)]
    pub record: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadInvestors<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(seeds = [INVESTORS_SEED, dcc_state.key().as_ref()], bump = investors.bump)]
    pub investors: Box<Account<'info, Investors>>,
}
