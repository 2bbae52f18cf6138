#![doc(test(attr(deny(warnings))))]

//! Cashbook Core keeps a single-user ledger of dated money movements,
//! persists it to a local JSON slot, and derives per-account balances
//! plus filtered, display-ready views for a host presentation layer.

pub mod dates;
pub mod errors;
pub mod ledger;
pub mod query;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashbook Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
