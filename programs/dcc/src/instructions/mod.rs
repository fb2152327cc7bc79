pub mod initialize;
pub mod set_beneficiary;
pub mod claim_pool;
pub mod add_investor;
pub mod set_investor;
pub mod remove_investor;
pub mod claim_investor;
pub mod blacklist;
pub mod transfer;
pub mod execute;
pub mod ownership;
pub mod views;

pub use initialize::*;
pub use set_beneficiary::*;
pub use claim_pool::*;
pub use add_investor::*;
pub use set_investor::*;
pub use remove_investor::*;
pub use claim_investor::*;
pub use blacklist::*;
pub use transfer::*;
pub use execute::*;
pub use ownership::*;
pub use views::*;
