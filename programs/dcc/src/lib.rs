use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;


pub use instructions::*;

use crate::constants::TREASURY_SEED;
use crate::error::DccError;
use crate::state::{mint_authority_address, PoolKind};

declare_id!("3PkxKvRgMUVM5RoRu1DFzSVZJQHi1W8tpm65NAxbBHLm");

#[program]
pub mod dcc {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::initialize(ctx, params)
    }

    pub fn set_team_address(ctx: Context<SetBeneficiary>, new_beneficiary: Pubkey) -> Result<()> {
        instructions::set_beneficiary::set_beneficiary(ctx, PoolKind::Team, new_beneficiary)
    }

    pub fn set_reserve_address(ctx: Context<SetBeneficiary>, new_beneficiary: Pubkey) -> Result<()> {
        instructions::set_beneficiary::set_beneficiary(ctx, PoolKind::Reserve, new_beneficiary)
    }

    pub fn claim_team(ctx: Context<ClaimPool>) -> Result<()> {
        instructions::claim_pool::claim_pool(ctx, PoolKind::Team)
    }

    pub fn claim_reserve(ctx: Context<ClaimPool>) -> Result<()> {
        instructions::claim_pool::claim_pool(ctx, PoolKind::Reserve)
    }

    pub fn add_investor(ctx: Context<AddInvestor>, wallet: Pubkey, points: u32) -> Result<u32> {
        instructions::add_investor::add_investor(ctx, wallet, points)
    }

    pub fn set_investor(ctx: Context<SetInvestor>, pid: u32, wallet: Pubkey, points: u32) -> Result<()> {
        instructions::set_investor::set_investor(ctx, pid, wallet, points)
    }

    pub fn remove_investor(ctx: Context<RemoveInvestor>, pid: u32) -> Result<()> {
        instructions::remove_investor::remove_investor(ctx, pid)
    }

    pub fn claim_investor(ctx: Context<ClaimInvestor>) -> Result<()> {
        instructions::claim_investor::claim_investor(ctx)
    }

    pub fn add_transfer_blacklist(ctx: Context<AddTransferBlacklist>, wallet: Pubkey) -> Result<()> {
        instructions::blacklist::add_transfer_blacklist(ctx, wallet)
    }

    pub fn remove_transfer_blacklist(ctx: Context<RemoveTransferBlacklist>, wallet: Pubkey) -> Result<()> {
        instructions::blacklist::remove_transfer_blacklist(ctx, wallet)
    }

    pub fn sync_blacklist_freeze(ctx: Context<SyncBlacklistFreeze>) -> Result<()> {
        instructions::blacklist::sync_blacklist_freeze(ctx)
    }

    pub fn transfer(ctx: Context<GuardedTransfer>, amount: u64) -> Result<()> {
        instructions::transfer::guarded_transfer(ctx, amount, false)
    }

    pub fn transfer_from(ctx: Context<GuardedTransfer>, amount: u64) -> Result<()> {
        instructions::transfer::guarded_transfer(ctx, amount, true)
    }

    pub fn execute<'info>(
        ctx: Context<'_, '_, 'info, 'info, Execute<'info>>,
        value: u64,
        data: Vec<u8>,
    ) -> Result<()> {
        let st = &ctx.accounts.dcc_state;
        let target = ctx.accounts.target_program.key();
        let forwarded: Vec<Pubkey> = ctx.remaining_accounts.iter().map(|a| *a.key).collect();
        st.check_execute(
            &ctx.accounts.owner.key(),
            &target,
            &forwarded,
            &[ctx.accounts.dcc_state.key(), mint_authority_address()],
        )?;

        let treasury_ai = ctx.accounts.treasury.to_account_info();
        let treasury_key = treasury_ai.key();
        let signer_seeds: &[&[&[u8]]] = &[&[TREASURY_SEED, &[st.treasury_bump]]];

        if value > 0 {
            let destination = ctx
                .accounts
                .value_destination
                .as_ref()
                .ok_or(DccError::InvalidAmount)?
                .to_account_info();
            let rent_floor = Rent::get()?.minimum_balance(0);
            instructions::execute::debit_above_rent(treasury_ai.lamports(), rent_floor, value)?;
            system_program::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.system_program.to_account_info(),
                    system_program::Transfer {
                        from: treasury_ai.clone(),
                        to: destination,
                    },
                    signer_seeds,
                ),
                value,
            )?;
        }

        let metas: Vec<AccountMeta> = ctx
            .remaining_accounts
            .iter()
            .map(|a| instructions::execute::forwarded_meta(*a.key, a.is_signer, a.is_writable, &treasury_key))
            .collect();
        let account_count = metas.len() as u32;
        let data_len = data.len() as u32;

        let ix = Instruction {
            program_id: target,
            accounts: metas,
            data,
        };

        let mut infos: Vec<AccountInfo<'info>> = ctx.remaining_accounts.to_vec();
        infos.push(ctx.accounts.target_program.to_account_info());

        invoke_signed(&ix, &infos, signer_seeds).map_err(|e| {
            msg!("forwarded call to {} failed: {:?}", target, e);
            error!(DccError::ExternalCallFailed)
        })?;

        emit!(Executed {
            target_program: target,
            treasury: treasury_key,
            value,
            data_len,
            account_count,
        });
        Ok(())
    }

    pub fn propose_owner(ctx: Context<ManageOwner>, new_owner: Pubkey) -> Result<()> {
        instructions::ownership::propose_owner(ctx, new_owner)
    }

    pub fn accept_owner(ctx: Context<AcceptOwner>) -> Result<()> {
        instructions::ownership::accept_owner(ctx)
    }

    pub fn cancel_owner_transfer(ctx: Context<ManageOwner>) -> Result<()> {
        instructions::ownership::cancel_owner_transfer(ctx)
    }

    pub fn get_cycle(ctx: Context<ReadState>) -> Result<u64> {
        instructions::views::get_cycle(ctx)
    }

    pub fn claimed(ctx: Context<ReadBeneficiary>, wallet: Pubkey) -> Result<u64> {
        instructions::views::claimed(ctx, wallet)
    }

    pub fn lp_of_pid(ctx: Context<ReadBeneficiary>, wallet: Pubkey) -> Result<u32> {
        instructions::views::lp_of_pid(ctx, wallet)
    }

    pub fn investor_total_point(ctx: Context<ReadInvestors>) -> Result<u32> {
        instructions::views::investor_total_point(ctx)
    }

    pub fn team_address(ctx: Context<ReadState>) -> Result<Pubkey> {
        instructions::views::beneficiary_address(ctx, PoolKind::Team)
    }

    pub fn reserve_address(ctx: Context<ReadState>) -> Result<Pubkey> {
        instructions::views::beneficiary_address(ctx, PoolKind::Reserve)
    }

    pub fn token_info(ctx: Context<ReadState>) -> Result<TokenInfo> {
        instructions::views::token_info(ctx)
    }
}
