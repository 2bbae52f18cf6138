pub mod interchange;
pub mod json_backend;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends holding the single ledger slot.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger) -> Result<()>;
    fn load(&self) -> Result<Ledger>;
}

pub use json_backend::JsonStorage;
