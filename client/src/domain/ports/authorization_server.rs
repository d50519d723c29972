//! Driven port for the OAuth2 token endpoint.

use async_trait::async_trait;

use super::AccountingError;
use crate::domain::{Credentials, TokenData};

/// Port for exchanging authorization codes and refresh tokens.
///
/// Adapters decode the token response but leave validation of its contents
/// to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorizationServer: Send + Sync {
    /// Exchange an authorization code for a token set.
    async fn exchange_code(
        &self,
        credentials: &Credentials,
        code: &str,
    ) -> Result<TokenData, AccountingError>;

    /// Exchange a refresh token for a new token set.
    async fn refresh(
        &self,
        credentials: &Credentials,
        refresh_token: &str,
    ) -> Result<TokenData, AccountingError>;
}
