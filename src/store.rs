//! The ledger store: exclusive owner of the canonical movement list and
//! the only writer to the persisted slot.

use tracing::{debug, info, warn};

use crate::{
    errors::LedgerError,
    ledger::{Ledger, Movement, MovementDraft, MovementId},
    storage::{interchange, StorageBackend},
};

/// Owns the in-memory ledger and its storage backend. Every mutation
/// persists immediately and recomputes the balances snapshot before
/// handing back the updated ledger.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
}

impl LedgerStore {
    /// Loads the persisted slot, falling back to an empty ledger when
    /// the slot is missing or structurally invalid. Never fails.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let mut ledger = match storage.load() {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!(error = %err, "persisted ledger missing or unreadable, starting empty");
                Ledger::default()
            }
        };
        ledger.recompute_balances();
        Self { ledger, storage }
    }

    /// Current snapshot: insertion-ordered movements plus derived
    /// balances.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Appends a new movement under a fresh id.
    pub fn create(&mut self, draft: MovementDraft) -> &Ledger {
        let movement = Movement::from_draft(MovementId::generate(), draft);
        debug!(id = %movement.id, "created movement");
        self.ledger.movements.push(movement);
        self.commit()
    }

    /// Replaces the fields of the movement with `id`, keeping the id.
    /// An unknown id is a silent no-op.
    pub fn update(&mut self, id: &MovementId, draft: MovementDraft) -> &Ledger {
        match self.ledger.movements.iter().position(|m| &m.id == id) {
            Some(index) => {
                self.ledger.movements[index] = Movement::from_draft(id.clone(), draft);
                debug!(id = %id, "updated movement");
                self.commit()
            }
            None => &self.ledger,
        }
    }

    /// Removes the movement with `id`. Deleting an unknown id is a
    /// no-op.
    pub fn delete(&mut self, id: &MovementId) -> &Ledger {
        let before = self.ledger.movements.len();
        self.ledger.movements.retain(|m| &m.id != id);
        if self.ledger.movements.len() == before {
            return &self.ledger;
        }
        debug!(id = %id, "deleted movement");
        self.commit()
    }

    /// Replaces the whole ledger from a serialized payload. On any
    /// structural failure the current ledger is left untouched and the
    /// failure is reported.
    pub fn import_replace(&mut self, payload: &str) -> Result<&Ledger, LedgerError> {
        let ledger = interchange::parse_import(payload)?;
        info!(movements = ledger.movement_count(), "imported replacement ledger");
        self.ledger = ledger;
        Ok(self.commit())
    }

    /// Serializes the full movement list with display-shape dates,
    /// suitable for re-import.
    pub fn export_serialize(&self) -> Result<String, LedgerError> {
        interchange::serialize_export(&self.ledger)
    }

    /// Recomputes balances and persists. A failed write keeps the
    /// in-memory state authoritative; the slot catches up on the next
    /// successful save.
    fn commit(&mut self) -> &Ledger {
        self.ledger.recompute_balances();
        if let Err(err) = self.storage.save(&self.ledger) {
            warn!(error = %err, "failed to persist ledger slot");
        }
        &self.ledger
    }
}
