use anchor_lang::prelude::*;
use anchor_spl::token::{self, FreezeAccount, Mint, ThawAccount, Token, TokenAccount};

use crate::constants::{BLACKLIST_SEED, DCC_STATE_SEED, MINT_AUTHORITY_SEED, MINT_SEED};
use crate::error::DccError;
use crate::state::{BlacklistEntry, DccState};
use crate::utils::guard::{self, FreezeAction};

/// Flag `wallet`. Re-adding an existing entry is a no-op. A supplied token
/// account of `wallet` is frozen so the plain token program cannot move it either.
pub fn add_transfer_blacklist(ctx: Context<AddTransferBlacklist>, wallet: Pubkey) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.dcc_state.owner,
        DccError::NotOwner
    );
    require!(wallet != Pubkey::default(), DccError::InvalidPubkey);

    let entry = &mut ctx.accounts.entry;
    if entry.wallet == Pubkey::default() {
        entry.wallet = wallet;
        entry.added_at = Clock::get()?.unix_timestamp;
        entry.bump = ctx.bumps.entry;
        msg!("blacklisted {}", wallet);
    }

    let frozen_account = match ctx.accounts.wallet_token_account.as_ref() {
        Some(token_account) => {
            sync_freeze(
                true,
                token_account,
                &wallet,
                &ctx.accounts.dcc_state,
                ctx.accounts.mint.to_account_info(),
                ctx.accounts.mint_authority.to_account_info(),
                ctx.accounts.token_program.to_account_info(),
            )?;
            Some(token_account.key())
        }
        None => None,
    };

    emit!(TransferBlacklistUpdated {
        wallet,
        blacklisted: true,
        token_account: frozen_account,
    });
    Ok(())
}

/// Unflag `wallet` by closing its entry; rent goes back to the owner. A
/// supplied token account of `wallet` is thawed.
pub fn remove_transfer_blacklist(ctx: Context<RemoveTransferBlacklist>, wallet: Pubkey) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.dcc_state.owner,
        DccError::NotOwner
    );

    let thawed_account = match ctx.accounts.wallet_token_account.as_ref() {
        Some(token_account) => {
            sync_freeze(
                false,
                token_account,
                &wallet,
                &ctx.accounts.dcc_state,
                ctx.accounts.mint.to_account_info(),
                ctx.accounts.mint_authority.to_account_info(),
                ctx.accounts.token_program.to_account_info(),
            )?;
            Some(token_account.key())
        }
        None => None,
    };
    msg!("unblacklisted {}", wallet);

    emit!(TransferBlacklistUpdated {
        wallet,
        blacklisted: false,
        token_account: thawed_account,
    });
    Ok(())
}

/// Permissionless: bring any DCC token account's freeze state in line with
/// its owner's blacklist entry. Covers accounts opened after the owner was flagged.
pub fn sync_blacklist_freeze(ctx: Context<SyncBlacklistFreeze>) -> Result<()> {
    let token_account = &ctx.accounts.token_account;
    let wallet = token_account.owner;
    let blacklisted = guard::is_blacklisted(&ctx.accounts.owner_blacklist);

    let action = sync_freeze(
        blacklisted,
        token_account,
        &wallet,
        &ctx.accounts.dcc_state,
        ctx.accounts.mint.to_account_info(),
        ctx.accounts.mint_authority.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
    )?;

    emit!(BlacklistFreezeSynced {
        wallet,
        token_account: token_account.key(),
        blacklisted,
        changed: action != FreezeAction::Keep,
    });
    Ok(())
}

fn sync_freeze<'info>(
    owner_blacklisted: bool,
    token_account: &Account<'info, TokenAccount>,
    wallet: &Pubkey,
    st: &DccState,
    mint: AccountInfo<'info>,
    mint_authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
) -> Result<FreezeAction> {
    require_keys_eq!(token_account.mint, st.mint, DccError::InvalidTokenMint);
    require_keys_eq!(token_account.owner, *wallet, DccError::NotAuthorized);

    let action = guard::freeze_action(owner_blacklisted, token_account.is_frozen());
    let signer_seeds: &[&[&[u8]]] = &[&[MINT_AUTHORITY_SEED, &[st.mint_authority_bump]]];
    match action {
        FreezeAction::Freeze => token::freeze_account(CpiContext::new_with_signer(
            token_program,
            FreezeAccount {
                account: token_account.to_account_info(),
                mint,
                authority: mint_authority,
            },
            signer_seeds,
        ))?,
        FreezeAction::Thaw => token::thaw_account(CpiContext::new_with_signer(
            token_program,
            ThawAccount {
                account: token_account.to_account_info(),
                mint,
                authority: mint_authority,
            },
            signer_seeds,
        ))?,
        FreezeAction::Keep => {}
    }
    if action != FreezeAction::Keep {
        msg!("{:?} token account {} of {}", action, token_account.key(), wallet);
    }
    Ok(action)
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct AddTransferBlacklist<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + BlacklistEntry::INIT_SPACE,
        seeds = [BLACKLIST_SEED, wallet.as_ref()],
        bump
    )]
    pub entry: Account<'info, BlacklistEntry>,

    /// DCC token account of `wallet` to freeze.
    #[account(mut)]
    pub wallet_token_account: Option<Box<Account<'info, TokenAccount>>>,

    #[account(seeds = [MINT_SEED], bump = dcc_state.mint_bump)]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA signer only.
    #[account(seeds = [MINT_AUTHORITY_SEED], bump = dcc_state.mint_authority_bump)]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct RemoveTransferBlacklist<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        mut,
        close = owner,
        seeds = [BLACKLIST_SEED, wallet.as_ref()],
        bump = entry.bump
    )]
    pub entry: Account<'info, BlacklistEntry>,

    /// DCC token account of `wallet` to thaw.
    #[account(mut)]
    pub wallet_token_account: Option<Box<Account<'info, TokenAccount>>>,

    #[account(seeds = [MINT_SEED], bump = dcc_state.mint_bump)]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA signer only.
    #[account(seeds = [MINT_AUTHORITY_SEED], bump = dcc_state.mint_authority_bump)]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SyncBlacklistFreeze<'info> {
    #[account(seeds = [DCC_STATE_SEED], bump = dcc_state.bump)]
    pub dcc_state: Box<Account<'info, DccState>>,

    #[account(
        mut,
        constraint = token_account.mint == dcc_state.mint @ DccError::InvalidTokenMint,
    )]
    pub token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA address is seed-checked; membership is its existence.
    #[account(seeds = [BLACKLIST_SEED, token_account.owner.as_ref()], bump)]
    pub owner_blacklist: UncheckedAccount<'info>,

    #[account(seeds = [MINT_SEED], bump = dcc_state.mint_bump)]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA signer only.
    #[account(seeds = [MINT_AUTHORITY_SEED], bump = dcc_state.mint_authority_bump)]
    pub mint_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TransferBlacklistUpdated {
    pub wallet: Pubkey,
    pub blacklisted: bool,
    /// Token account frozen or thawed alongside the entry, if one was supplied.
    pub token_account: Option<Pubkey>,
}

#[event]
pub struct BlacklistFreezeSynced {
    pub wallet: Pubkey,
    pub token_account: Pubkey,
    pub blacklisted: bool,
    pub changed: bool,
}
