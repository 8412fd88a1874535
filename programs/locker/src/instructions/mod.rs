pub mod initialize_registry;
pub mod set_fees;
pub mod set_fee_recipient;
pub mod create_locker;
pub mod list_lockers;
pub mod deposit;
pub mod claim;
pub mod suggest_unlock;
pub mod approve_emergency_unlock;
pub mod start_proposal;
pub mod vote;
pub mod end_proposal;
pub mod quote_account;
pub mod recover_token;
pub mod recover_lamports;

pub use initialize_registry::*;
pub use set_fees::*;
pub use set_fee_recipient::*;
pub use create_locker::*;
pub use list_lockers::*;
pub use deposit::*;
pub use claim::*;
pub use suggest_unlock::*;
pub use approve_emergency_unlock::*;
pub use start_proposal::*;
pub use vote::*;
pub use end_proposal::*;
pub use quote_account::*;
pub use recover_token::*;
pub use recover_lamports::*;
