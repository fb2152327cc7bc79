pub mod beneficiary;
pub mod blacklist;
pub mod dcc_state;
pub mod investors;

pub use beneficiary::*;
pub use blacklist::*;
pub use dcc_state::*;
pub use investors::*;
