//! Transfer blacklist checks.
//! - guarded transfers: amount, blacklist, then signer and balance
//! - SPL freeze state follows blacklist membership, so direct token-program
//!   transfers from a flagged wallet fail too

use anchor_lang::prelude::*;

use crate::error::DccError;

/// A blacklist entry exists iff its PDA is owned by this program and holds data.
/// Callers must have validated the PDA address via `seeds`.
pub fn is_blacklisted(entry: &AccountInfo) -> bool {
    entry.owner == &crate::ID && !entry.data_is_empty()
}

/// Sender is checked first, so a transfer between two flagged owners reports the sender.
pub fn check_transfer(sender_blacklisted: bool, recipient_blacklisted: bool) -> core::result::Result<(), DccError> {
    if sender_blacklisted {
        return Err(DccError::BlacklistedSender);
    }
    if recipient_blacklisted {
        return Err(DccError::BlacklistedRecipient);
    }
    Ok(())
}

/// Payouts only have a recipient.
pub fn check_recipient(recipient_blacklisted: bool) -> core::result::Result<(), DccError> {
    check_transfer(false, recipient_blacklisted)
}

/// Inputs of a guarded `transfer` / `transfer_from`, read from the source token account.
#[derive(Clone, Copy, Debug)]
pub struct TransferCheck {
    pub amount: u64,
    pub authority: Pubkey,
    pub source_owner: Pubkey,
    pub source_delegate: Option<Pubkey>,
    pub delegated_amount: u64,
    pub source_balance: u64,
    pub sender_blacklisted: bool,
    pub recipient_blacklisted: bool,
    /// Signer acts as the SPL delegate rather than the owner.
    pub delegated: bool,
}

/// Everything that can reject a guarded transfer, decided before any CPI.
pub fn authorize_transfer(check: &TransferCheck) -> core::result::Result<(), DccError> {
    if check.amount == 0 {
        return Err(DccError::InvalidAmount);
    }
    check_transfer(check.sender_blacklisted, check.recipient_blacklisted)?;
    if check.delegated {
        if check.source_delegate != Some(check.authority) {
            return Err(DccError::NotAuthorized);
        }
        if check.delegated_amount < check.amount {
            return Err(DccError::InsufficientFunds);
        }
    } else if check.authority != check.source_owner {
        return Err(DccError::NotAuthorized);
    }
    if check.source_balance < check.amount {
        return Err(DccError::InsufficientFunds);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreezeAction {
    Freeze,
    Thaw,
    Keep,
}

/// Freeze change that brings a token account in line with its owner's blacklist status.
pub fn freeze_action(owner_blacklisted: bool, frozen: bool) -> FreezeAction {
    match (owner_blacklisted, frozen) {
        (true, false) => FreezeAction::Freeze,
        (false, true) => FreezeAction::Thaw,
        _ => FreezeAction::Keep,
    }
}

/// Beneficiaries must be real wallets: not unset, not this program, not one of
/// its own accounts (those sign for the mint, the treasury or hold state).
pub fn check_beneficiary_wallet(wallet: &Pubkey, program_accounts: &[Pubkey]) -> core::result::Result<(), DccError> {
    if *wallet == Pubkey::default() {
        return Err(DccError::InvalidPubkey);
    }
    if *wallet == crate::ID || program_accounts.contains(wallet) {
        return Err(DccError::InvalidBeneficiary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_transfer_passes() {
        assert!(check_transfer(false, false).is_ok());
        assert!(check_recipient(false).is_ok());
    }

    #[test]
    fn flagged_parties_are_rejected() {
        assert!(matches!(check_transfer(true, false), Err(DccError::BlacklistedSender)));
        assert!(matches!(check_transfer(false, true), Err(DccError::BlacklistedRecipient)));
        assert!(matches!(check_transfer(true, true), Err(DccError::BlacklistedSender)));
        assert!(matches!(check_recipient(true), Err(DccError::BlacklistedRecipient)));
    }

    fn owner_transfer(amount: u64) -> TransferCheck {
        let owner = Pubkey::new_unique();
        TransferCheck {
            amount,
            authority: owner,
            source_owner: owner,
            source_delegate: None,
            delegated_amount: 0,
            source_balance: 100,
            sender_blacklisted: false,
            recipient_blacklisted: false,
            delegated: false,
        }
    }

    /// Applies `check` to a two-account ledger only when it is authorized.
    fn settle(check: &TransferCheck, balances: &mut [u64; 2]) -> core::result::Result<(), DccError> {
        authorize_transfer(check)?;
        balances[0] -= check.amount;
        balances[1] += check.amount;
        Ok(())
    }

    #[test]
    fn owner_transfer_passes_and_moves_balance() {
        let check = owner_transfer(40);
        let mut balances = [100, 0];
        settle(&check, &mut balances).unwrap();
        assert_eq!(balances, [60, 40]);
    }

    #[test]
    fn rejected_transfer_leaves_balances_untouched() {
        let mut balances = [100, 0];

        let mut to_flagged = owner_transfer(40);
        to_flagged.recipient_blacklisted = true;
        assert!(matches!(settle(&to_flagged, &mut balances), Err(DccError::BlacklistedRecipient)));

        let mut from_flagged = owner_transfer(40);
        from_flagged.sender_blacklisted = true;
        assert!(matches!(settle(&from_flagged, &mut balances), Err(DccError::BlacklistedSender)));

        assert!(matches!(settle(&owner_transfer(0), &mut balances), Err(DccError::InvalidAmount)));
        assert!(matches!(settle(&owner_transfer(101), &mut balances), Err(DccError::InsufficientFunds)));

        let mut stranger = owner_transfer(1);
        stranger.authority = Pubkey::new_unique();
        assert!(matches!(settle(&stranger, &mut balances), Err(DccError::NotAuthorized)));

        assert_eq!(balances, [100, 0]);
    }

    #[test]
    fn delegated_transfer_requires_matching_delegate_and_allowance() {
        let delegate = Pubkey::new_unique();
        let mut check = owner_transfer(10);
        check.delegated = true;
        check.authority = delegate;
        assert!(matches!(authorize_transfer(&check), Err(DccError::NotAuthorized)));

        check.source_delegate = Some(delegate);
        check.delegated_amount = 5;
        assert!(matches!(authorize_transfer(&check), Err(DccError::InsufficientFunds)));

        check.delegated_amount = 10;
        assert!(authorize_transfer(&check).is_ok());

        // The owner cannot use the delegate path.
        check.authority = check.source_owner;
        assert!(matches!(authorize_transfer(&check), Err(DccError::NotAuthorized)));
    }

    #[test]
    fn freeze_state_follows_blacklist() {
        assert_eq!(freeze_action(true, false), FreezeAction::Freeze);
        assert_eq!(freeze_action(true, true), FreezeAction::Keep);
        assert_eq!(freeze_action(false, true), FreezeAction::Thaw);
        assert_eq!(freeze_action(false, false), FreezeAction::Keep);
    }

    #[test]
    fn program_accounts_cannot_be_beneficiaries() {
        let state = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        assert!(check_beneficiary_wallet(&wallet, &[state]).is_ok());
        assert!(matches!(
            check_beneficiary_wallet(&Pubkey::default(), &[state]),
            Err(DccError::InvalidPubkey)
        ));
        assert!(matches!(
            check_beneficiary_wallet(&state, &[state]),
            Err(DccError::InvalidBeneficiary)
        ));
        assert!(matches!(
            check_beneficiary_wallet(&crate::ID, &[state]),
            Err(DccError::InvalidBeneficiary)
        ));
    }

    #[test]
    fn entry_detection_requires_program_owned_data() {
        let key = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;
        let mut lamports = 1_000_000u64;
        let mut empty: Vec<u8> = vec![];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut empty, &system, false, 0);
        assert!(!is_blacklisted(&info));

        let mut lamports = 1_000_000u64;
        let mut data = vec![1u8; 48];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &crate::ID, false, 0);
        assert!(is_blacklisted(&info));

        let mut lamports = 1_000_000u64;
        let mut data = vec![1u8; 48];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);
        assert!(!is_blacklisted(&info));
    }
}
