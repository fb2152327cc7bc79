pub mod cycle;
pub mod guard;
pub mod vesting;
