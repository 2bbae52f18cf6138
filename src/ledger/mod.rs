//! Ledger domain models and derived balances.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod movement;

pub use ledger::{round2, Balances, Ledger};
pub use movement::{AccountType, Movement, MovementDraft, MovementId};
