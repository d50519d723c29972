//! Ledger account projection.

use serde::{Deserialize, Serialize};

/// A chart-of-accounts line, projected from the remote ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Remote ledger account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Nominal code.
    pub code: String,
    /// Ledger account type identifier, for example `SALES`.
    #[serde(rename = "type")]
    pub account_type: String,
}
