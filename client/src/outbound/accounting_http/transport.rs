//! Transport plumbing shared by the accounting adapters: client identity,
//! endpoint joining, status checks, and JSON decoding.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::domain::AccountingError;

/// OAuth2 server used when none is configured.
pub const DEFAULT_OAUTH_ENDPOINT: &str = "https://oauth.accounting.sage.com";
/// Accounting API base used when none is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.accounting.sage.com/v3.1";

const DEFAULT_USER_AGENT: &str = concat!("accounting-client/", env!("CARGO_PKG_VERSION"));
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound identity and timeout applied to every accounting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountingHttpIdentity {
    /// HTTP user-agent sent with each request.
    pub user_agent: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for AccountingHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AccountingHttpIdentity {
    /// Build a reqwest client carrying this identity.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::Transport`] when the TLS backend or client
    /// cannot be initialised.
    pub fn build_client(&self) -> Result<Client, AccountingError> {
        Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
            .map_err(map_transport_error)
    }
}

/// Append one path segment to `base`, keeping any base path.
pub(super) fn endpoint_url(base: &Url, segment: &str) -> Result<Url, AccountingError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            AccountingError::invalid_request(format!("endpoint '{base}' cannot carry a path"))
        })?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// Check the status, then decode the body as `T`.
pub(super) async fn decode_success<T: DeserializeOwned>(
    response: Response,
    endpoint: &'static str,
) -> Result<T, AccountingError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        warn!(
            endpoint,
            status = status.as_u16(),
            body = %body_preview(body.as_ref()),
            "accounting endpoint returned non-success status"
        );
        return Err(AccountingError::invalid_http_response(status.as_u16()));
    }
    decode_json(body.as_ref())
}

pub(super) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AccountingError> {
    serde_json::from_slice(body)
        .map_err(|error| AccountingError::invalid_json_response(error.to_string()))
}

pub(super) fn map_transport_error(error: reqwest::Error) -> AccountingError {
    if error.is_timeout() {
        AccountingError::transport(format!("request timed out: {error}"))
    } else {
        AccountingError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
