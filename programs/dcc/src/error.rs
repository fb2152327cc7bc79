use anchor_lang::prelude::*;

/// Custom error codes for the DCC program.
#[error_code]
pub enum DccError {
    #[msg("Unauthorized: owner signature required")]
    NotOwner,

    #[msg("Unauthorized: caller is not the pool beneficiary")]
    NotAuthorized,

    #[msg("!0")]
    NoBeneficiarySet,

    #[msg("no investor")]
    NoInvestor,

    #[msg("<=max")]
    PointCapExceeded,

    #[msg("Invalid points (must be > 0)")]
    InvalidPoints,

    #[msg("DCC: transfer from the blacklisted address")]
    BlacklistedSender,

    #[msg("DCC: transfer to the blacklisted address")]
    BlacklistedRecipient,

    #[msg("Forwarded call failed")]
    ExternalCallFailed,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Program accounts cannot be beneficiaries")]
    InvalidBeneficiary,

    #[msg("Address already holds a beneficiary role")]
    BeneficiaryInUse,

    #[msg("Previous beneficiary record missing or mismatched")]
    BeneficiaryRecordMismatch,

    #[msg("Investor slot not found")]
    InvestorNotFound,

    #[msg("Investor list is full")]
    InvestorListFull,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Pool allocations exceed max supply")]
    AllocationExceedsSupply,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Insufficient funds")]
    InsufficientFunds,

    #[msg("Forwarded call cannot target this program")]
    ReentrantCall,

    #[msg("Forwarded call cannot include program authorities")]
    ProtectedAccount,

    #[msg("No pending owner transfer")]
    NoPendingOwner,

    #[msg("Math overflow")]
    MathOverflow,
}
