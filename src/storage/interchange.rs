//! Import/export document shapes.
//!
//! Export renders dates in the display shape for readability; import
//! accepts canonical or display dates per record and back-fills the
//! canonical form, validating the whole payload before anything is
//! replaced.

use serde::{Deserialize, Serialize};

use crate::{
    dates,
    errors::LedgerError,
    ledger::{AccountType, Balances, Ledger, Movement, MovementId},
};

/// Inbound payloads may be a document wrapping a `movements` array or
/// the bare array itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Document { movements: Vec<ImportRecord> },
    List(Vec<ImportRecord>),
}

/// One inbound movement record. `date` may be canonical or display
/// shaped; an explicit canonical `dateIso` wins when both are present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportRecord {
    id: String,
    date: String,
    #[serde(default)]
    date_iso: Option<String>,
    subject: String,
    account_type: AccountType,
    amount: f64,
}

impl ImportRecord {
    fn into_movement(self, index: usize) -> Result<Movement, LedgerError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(LedgerError::Import(format!("movement {index}: empty id")));
        }
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(LedgerError::Import(format!(
                "movement {index}: empty subject"
            )));
        }
        let raw_date = self.date_iso.as_deref().unwrap_or(&self.date);
        let date = dates::canonicalize(raw_date).map_err(|_| {
            LedgerError::Import(format!(
                "movement {index}: unrecognized date `{raw_date}`"
            ))
        })?;
        Ok(Movement {
            id: MovementId::new(id),
            date,
            subject: subject.to_string(),
            account_type: self.account_type,
            amount: self.amount,
        })
    }
}

/// Parses a serialized payload into a full replacement ledger with
/// recomputed balances. Any structural failure rejects the payload as a
/// whole.
pub fn parse_import(payload: &str) -> Result<Ledger, LedgerError> {
    let payload: ImportPayload =
        serde_json::from_str(payload).map_err(|err| LedgerError::Import(err.to_string()))?;
    let records = match payload {
        ImportPayload::Document { movements } => movements,
        ImportPayload::List(movements) => movements,
    };
    let movements = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_movement(index))
        .collect::<Result<Vec<_>, _>>()?;
    let mut ledger = Ledger {
        movements,
        balances: Balances::default(),
    };
    ledger.recompute_balances();
    Ok(ledger)
}

/// Outbound movement record, date in display shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRecord {
    id: String,
    date: String,
    subject: String,
    account_type: AccountType,
    amount: f64,
}

/// The exported document: movement list plus the advisory balances
/// block. Round-trips through [`parse_import`].
#[derive(Debug, Serialize)]
struct ExportDocument {
    movements: Vec<ExportRecord>,
    balances: Balances,
}

/// Serializes the full ledger with display-shape dates.
pub fn serialize_export(ledger: &Ledger) -> Result<String, LedgerError> {
    let document = ExportDocument {
        movements: ledger
            .movements
            .iter()
            .map(|movement| ExportRecord {
                id: movement.id.to_string(),
                date: dates::to_display(movement.date),
                subject: movement.subject.clone(),
                account_type: movement.account_type,
                amount: movement.amount,
            })
            .collect(),
        balances: ledger.balances,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
