use serde::{Deserialize, Serialize};

use super::movement::{AccountType, Movement, MovementId};

/// Rounds to two decimal places, half away from zero. Deterministic;
/// every aggregated or displayed amount goes through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-account balances plus the grand total. Derived, never ground
/// truth: recomputed from the movement list after every load and
/// mutation, so the persisted copy is advisory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    #[serde(default)]
    pub bank: f64,
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub total: f64,
}

impl Balances {
    pub fn from_movements(movements: &[Movement]) -> Self {
        let sum_for = |account: AccountType| -> f64 {
            movements
                .iter()
                .filter(|m| m.account_type == account)
                .map(|m| m.amount)
                .sum()
        };
        let bank = round2(sum_for(AccountType::Bank));
        let cash = round2(sum_for(AccountType::Cash));
        Self {
            bank,
            cash,
            total: round2(bank + cash),
        }
    }

    pub fn for_account(&self, account: AccountType) -> f64 {
        match account {
            AccountType::Bank => self.bank,
            AccountType::Cash => self.cash,
        }
    }
}

/// The aggregate: an insertion-ordered movement list plus the derived
/// balances snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub balances: Balances,
}

impl Ledger {
    pub fn recompute_balances(&mut self) {
        self.balances = Balances::from_movements(&self.movements);
    }

    pub fn movement(&self, id: &MovementId) -> Option<&Movement> {
        self.movements.iter().find(|m| &m.id == id)
    }

    pub fn movement_count(&self) -> usize {
        self.movements.len()
    }
}
