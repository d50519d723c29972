//! Reqwest-backed adapters for the accounting service.
//!
//! [`HttpAuthorizationServer`] talks to the OAuth2 token endpoint and
//! [`HttpLedgerApi`] to the accounting API. Both can share one
//! `reqwest::Client` built from an [`AccountingHttpIdentity`].

mod authorization;
mod dto;
mod ledger;
mod transport;

pub use authorization::HttpAuthorizationServer;
pub use ledger::HttpLedgerApi;
pub use transport::{AccountingHttpIdentity, DEFAULT_API_ENDPOINT, DEFAULT_OAUTH_ENDPOINT};
