//! Program-wide constants.

/// Token display name.
pub const TOKEN_NAME: &str = "Dcc";

/// Token symbol.
pub const TOKEN_SYMBOL: &str = "Dcc";

/// Decimals of the DCC mint.
pub const DCC_DECIMALS: u8 = 9;

/// One whole token in base units.
pub const ONE_DCC: u64 = 1_000_000_000;

/// Hard cap on everything the mint will ever issue (1B tokens).
pub const MAX_SUPPLY: u64 = 1_000_000_000 * ONE_DCC;

/// Upper bound on the sum of all investor point weights.
pub const MAX_POINTS: u32 = 10_000;

/// Max investor slots stored in the investors PDA.
pub const MAX_INVESTORS: usize = 64;

/// Slot id returned when an address holds no investor slot.
pub const NO_INVESTOR_PID: u32 = 0;

// Reference deployment: 25% team over 48 cycles, 33% reserve and 33% investor
// pool over 36 cycles, the remaining 9% minted to the deployer.
pub const DEFAULT_CYCLE_DURATION: i64 = 30 * 86_400;
pub const DEFAULT_TEAM_ALLOCATION: u64 = 250_000_000 * ONE_DCC;
pub const DEFAULT_TEAM_CYCLES: u64 = 48;
pub const DEFAULT_RESERVE_ALLOCATION: u64 = 330_000_000 * ONE_DCC;
pub const DEFAULT_RESERVE_CYCLES: u64 = 36;
pub const DEFAULT_INVESTOR_ALLOCATION: u64 = 330_000_000 * ONE_DCC;
pub const DEFAULT_INVESTOR_CYCLES: u64 = 36;

pub const DCC_STATE_SEED: &[u8] = b"dcc_state";
pub const MINT_SEED: &[u8] = b"mint";
/// Mint and freeze authority; signs nothing but claims, the deployer mint and blacklist freezes.
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
/// System-owned PDA that holds recoverable assets and signs forwarded calls.
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const INVESTORS_SEED: &[u8] = b"investors";
pub const BENEFICIARY_SEED: &[u8] = b"beneficiary";
pub const BLACKLIST_SEED: &[u8] = b"blacklist";
