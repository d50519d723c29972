//! Domain types, ports, and the accounting client service.
//!
//! Nothing here knows about HTTP; the outbound adapters translate between
//! these types and the remote wire format.

mod accounting_client;
mod credentials;
mod journal;
mod ledger_account;
pub mod ports;
mod token;

pub use accounting_client::{
    AccountingClient, AccountingClientOptions, AccountingClientPorts, DEFAULT_CONSENT_ENDPOINT,
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
};
pub use credentials::Credentials;
pub use journal::{JournalData, JournalLine, Posting};
pub use ledger_account::Account;
pub use ports::AccountingError;
pub use token::TokenData;
