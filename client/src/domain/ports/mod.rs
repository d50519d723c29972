//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod accounting_error;
mod authorization_server;
mod ledger_api;

pub use accounting_error::AccountingError;
#[cfg(test)]
pub use authorization_server::MockAuthorizationServer;
pub use authorization_server::AuthorizationServer;
#[cfg(test)]
pub use ledger_api::MockLedgerApi;
pub use ledger_api::{LedgerAccountPage, LedgerApi};
