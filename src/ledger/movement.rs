use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a movement, assigned at creation and never
/// reused. Fresh ids are UUIDv4 strings; imported ledgers may carry a
/// foreign id scheme and keep it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(String);

impl MovementId {
    /// Mints a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Partition key for balance aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "BANK")]
    Bank,
    #[serde(rename = "CASH")]
    Cash,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::Bank, AccountType::Cash];

    /// Wire and display tag for this account type.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bank => "BANK",
            Self::Cash => "CASH",
        }
    }

    /// Resolves a tag back to the account type, if known.
    pub fn from_tag(raw: &str) -> Option<Self> {
        match raw {
            "BANK" => Some(Self::Bank),
            "CASH" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single ledger entry. The date serializes in the canonical sortable
/// shape; any other rendering is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: MovementId,
    pub date: NaiveDate,
    pub subject: String,
    pub account_type: AccountType,
    pub amount: f64,
}

impl Movement {
    pub fn from_draft(id: MovementId, draft: MovementDraft) -> Self {
        Self {
            id,
            date: draft.date,
            subject: draft.subject,
            account_type: draft.account_type,
            amount: draft.amount,
        }
    }
}

/// Validated movement fields awaiting an identifier, produced by form
/// parsing and consumed by create/update.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub date: NaiveDate,
    pub subject: String,
    pub account_type: AccountType,
    pub amount: f64,
}
