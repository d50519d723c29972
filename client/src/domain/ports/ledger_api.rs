//! Driven port for the accounting API.
//!
//! The domain owns the page contract so listing orchestration can stay
//! adapter-agnostic.

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::Value;

use super::AccountingError;
use crate::domain::{Account, JournalData};

/// One page of ledger accounts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerAccountPage {
    /// Accounts on this page, already projected.
    pub accounts: Vec<Account>,
    /// Total number of accounts reported by the remote collection.
    pub total: u64,
}

/// Port for the ledger account listing and journal posting endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Fetch one page of ledger accounts.
    async fn fetch_ledger_accounts(
        &self,
        access_token: &str,
        page: PageRequest,
    ) -> Result<LedgerAccountPage, AccountingError>;

    /// Post a journal and return the remote representation of it.
    async fn post_journal(
        &self,
        access_token: &str,
        journal: &JournalData,
    ) -> Result<Value, AccountingError>;
}
