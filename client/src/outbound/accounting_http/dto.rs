//! DTOs for the accounting API wire format.
//!
//! Listing responses decode into these transport DTOs first, then map into
//! domain accounts in one pass. Journals map from the domain into the
//! request envelope.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ports::LedgerAccountPage;
use crate::domain::{Account, JournalData, JournalLine};

#[derive(Debug, Deserialize)]
pub(super) struct LedgerAccountsPageDto {
    #[serde(rename = "$items")]
    pub(super) items: Vec<LedgerAccountDto>,
    #[serde(rename = "$total", default)]
    pub(super) total: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct LedgerAccountDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) nominal_code: Option<NominalCodeDto>,
    pub(super) ledger_account_type: LedgerAccountTypeDto,
}

/// Nominal codes arrive as integers from some regions and strings from others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum NominalCodeDto {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub(super) struct LedgerAccountTypeDto {
    pub(super) id: String,
}

impl LedgerAccountsPageDto {
    pub(super) fn into_domain_page(self) -> LedgerAccountPage {
        LedgerAccountPage {
            accounts: self
                .items
                .into_iter()
                .map(LedgerAccountDto::into_domain_account)
                .collect(),
            total: self.total,
        }
    }
}

impl LedgerAccountDto {
    fn into_domain_account(self) -> Account {
        let code = match self.nominal_code {
            Some(NominalCodeDto::Number(code)) => code.to_string(),
            Some(NominalCodeDto::Text(code)) => code,
            None => String::new(),
        };
        Account {
            id: self.id,
            name: self.name,
            code,
            account_type: self.ledger_account_type.id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct JournalEnvelopeDto<'a> {
    journal: JournalDto<'a>,
}

#[derive(Debug, Serialize)]
struct JournalDto<'a> {
    date: NaiveDate,
    reference: &'a str,
    journal_lines: Vec<JournalLineDto<'a>>,
}

#[derive(Debug, Serialize)]
struct JournalLineDto<'a> {
    details: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    debit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    credit: Decimal,
    ledger_account_id: &'a str,
}

impl<'a> From<&'a JournalData> for JournalEnvelopeDto<'a> {
    fn from(journal: &'a JournalData) -> Self {
        Self {
            journal: JournalDto {
                date: journal.date,
                reference: &journal.narration,
                journal_lines: journal.lines.iter().map(JournalLineDto::from).collect(),
            },
        }
    }
}

impl<'a> From<&'a JournalLine> for JournalLineDto<'a> {
    fn from(line: &'a JournalLine) -> Self {
        let posting = line.posting();
        Self {
            details: &line.description,
            debit: posting.debit,
            credit: posting.credit,
            ledger_account_id: &line.account_code,
        }
    }
}
