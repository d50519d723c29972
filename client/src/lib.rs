//! Client for a hosted accounting service's REST API.
//!
//! [`AccountingClient`] drives the OAuth2 authorization-code flow, lists
//! ledger accounts across pages, and posts journals. Remote calls go through
//! the ports in [`domain::ports`]; [`outbound::accounting_http`] provides the
//! reqwest adapters and [`config::AccountingSettings`] wires them together.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::{AccountingSettings, SettingsError};
pub use domain::{
    Account, AccountingClient, AccountingClientOptions, AccountingClientPorts, AccountingError,
    Credentials, JournalData, JournalLine, Posting, TokenData,
};
