//! Reqwest-backed OAuth2 token endpoint adapter.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use super::transport::{AccountingHttpIdentity, decode_success, endpoint_url, map_transport_error};
use crate::domain::ports::AuthorizationServer;
use crate::domain::{AccountingError, Credentials, TokenData};

/// Token endpoint adapter posting form-encoded grants to `<endpoint>/token`.
pub struct HttpAuthorizationServer {
    client: Client,
    token_url: Url,
}

impl HttpAuthorizationServer {
    /// Build an adapter with its own reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or `endpoint` cannot
    /// carry a path.
    pub fn new(endpoint: &Url, identity: &AccountingHttpIdentity) -> Result<Self, AccountingError> {
        Self::with_client(identity.build_client()?, endpoint)
    }

    /// Build an adapter around an existing reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::InvalidRequest`] when `endpoint` cannot
    /// carry a path.
    pub fn with_client(client: Client, endpoint: &Url) -> Result<Self, AccountingError> {
        Ok(Self {
            client,
            token_url: endpoint_url(endpoint, "token")?,
        })
    }

    async fn request_token(
        &self,
        grant_type: &'static str,
        form: &[(&str, &str)],
    ) -> Result<TokenData, AccountingError> {
        debug!(grant_type, url = %self.token_url, "requesting token");
        let response = self
            .client
            .post(self.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_success(response, "token").await
    }
}

#[async_trait]
impl AuthorizationServer for HttpAuthorizationServer {
    async fn exchange_code(
        &self,
        credentials: &Credentials,
        code: &str,
    ) -> Result<TokenData, AccountingError> {
        const GRANT_TYPE: &str = "authorization_code";
        self.request_token(
            GRANT_TYPE,
            &[
                ("client_id", credentials.client_id()),
                ("client_secret", credentials.client_secret()),
                ("code", code),
                ("grant_type", GRANT_TYPE),
                ("redirect_uri", credentials.redirect_uri()),
            ],
        )
        .await
    }

    async fn refresh(
        &self,
        credentials: &Credentials,
        refresh_token: &str,
    ) -> Result<TokenData, AccountingError> {
        const GRANT_TYPE: &str = "refresh_token";
        self.request_token(
            GRANT_TYPE,
            &[
                ("client_id", credentials.client_id()),
                ("client_secret", credentials.client_secret()),
                ("grant_type", GRANT_TYPE),
                ("refresh_token", refresh_token),
            ],
        )
        .await
    }
}
