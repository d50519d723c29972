//! Outbound adapters implementing domain ports for external services.
//!
//! Adapters are thin translators between domain types and the remote wire
//! format. They contain no listing or token lifecycle logic.

pub mod accounting_http;
