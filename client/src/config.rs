//! Accounting client configuration loaded via OrthoConfig.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{PageCountPolicy, PageSize};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{
    AccountingClient, AccountingClientOptions, AccountingClientPorts, AccountingError,
    Credentials, DEFAULT_CONSENT_ENDPOINT, TokenData,
};
use crate::outbound::accounting_http::{
    AccountingHttpIdentity, DEFAULT_API_ENDPOINT, DEFAULT_OAUTH_ENDPOINT, HttpAuthorizationServer,
    HttpLedgerApi,
};

/// Errors raised while turning settings into a working client.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required setting was not supplied by any layer.
    #[error("missing required setting '{field}'")]
    Missing {
        /// Setting name.
        field: &'static str,
    },
    /// A supplied setting could not be interpreted.
    #[error("invalid setting '{field}': {message}")]
    Invalid {
        /// Setting name.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
    /// The client rejected the wiring built from the settings.
    #[error(transparent)]
    Client(#[from] AccountingError),
}

/// Configuration values for the accounting client.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTING")]
pub struct AccountingSettings {
    /// OAuth client identifier.
    pub client_id: Option<String>,
    /// OAuth client secret.
    pub client_secret: Option<String>,
    /// Redirect URI registered with the authorization server.
    pub redirect_uri: Option<String>,
    /// Authorization server base URL.
    pub oauth_endpoint: Option<String>,
    /// Accounting API base URL, including its version path.
    pub api_endpoint: Option<String>,
    /// Browser consent page base URL.
    pub consent_endpoint: Option<String>,
    /// Ledger accounts requested per page.
    #[ortho_config(default = 200)]
    pub page_size: u32,
    /// Largest number of pages one listing may fetch.
    #[ortho_config(default = 1000)]
    pub max_pages: u32,
    /// `round-up` or `legacy`.
    pub page_count_policy: Option<String>,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// User-agent sent with every request.
    pub user_agent: Option<String>,
}

impl fmt::Debug for AccountingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountingSettings")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("oauth_endpoint", &self.oauth_endpoint)
            .field("api_endpoint", &self.api_endpoint)
            .field("consent_endpoint", &self.consent_endpoint)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("page_count_policy", &self.page_count_policy)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl AccountingSettings {
    /// Client credentials; all three parts are required.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] naming the first absent part.
    pub fn credentials(&self) -> Result<Credentials, SettingsError> {
        Ok(Credentials::new(
            required("client_id", self.client_id.as_deref())?,
            required("client_secret", self.client_secret.as_deref())?,
            required("redirect_uri", self.redirect_uri.as_deref())?,
        ))
    }

    /// Authorization server URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when the value is not a URL.
    pub fn oauth_endpoint(&self) -> Result<Url, SettingsError> {
        parse_url(
            "oauth_endpoint",
            self.oauth_endpoint.as_deref().unwrap_or(DEFAULT_OAUTH_ENDPOINT),
        )
    }

    /// Accounting API URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when the value is not a URL.
    pub fn api_endpoint(&self) -> Result<Url, SettingsError> {
        parse_url(
            "api_endpoint",
            self.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT),
        )
    }

    /// Consent page URL, falling back to the default.
    #[must_use]
    pub fn consent_endpoint(&self) -> &str {
        self.consent_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_CONSENT_ENDPOINT)
    }

    /// Page size.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for a zero size.
    pub fn page_size(&self) -> Result<PageSize, SettingsError> {
        PageSize::new(self.page_size).map_err(|error| invalid("page_size", error))
    }

    /// Page ceiling for one listing.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for a zero limit.
    pub fn max_pages(&self) -> Result<u32, SettingsError> {
        if self.max_pages == 0 {
            return Err(invalid("max_pages", "must be greater than zero"));
        }
        Ok(self.max_pages)
    }

    /// Page-count policy, falling back to rounding up.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for an unknown policy name.
    pub fn page_count_policy(&self) -> Result<PageCountPolicy, SettingsError> {
        self.page_count_policy
            .as_deref()
            .map_or(Ok(PageCountPolicy::default()), |value| {
                value
                    .parse()
                    .map_err(|error| invalid("page_count_policy", error))
            })
    }

    /// Transport identity built from the timeout and user-agent overrides.
    #[must_use]
    pub fn identity(&self) -> AccountingHttpIdentity {
        let defaults = AccountingHttpIdentity::default();
        AccountingHttpIdentity {
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            timeout: self
                .request_timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        }
    }
}

impl AccountingClient {
    /// Wire the reqwest adapters described by `settings` into a client.
    ///
    /// Both adapters share one connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for missing or malformed settings, and
    /// [`SettingsError::Client`] when `token` is invalid or the HTTP client
    /// cannot be built.
    pub fn from_settings(
        settings: &AccountingSettings,
        token: Option<TokenData>,
    ) -> Result<Self, SettingsError> {
        let credentials = settings.credentials()?;
        let options = AccountingClientOptions {
            consent_endpoint: settings.consent_endpoint().to_owned(),
            page_size: settings.page_size()?,
            page_count_policy: settings.page_count_policy()?,
            max_pages: settings.max_pages()?,
        };
        let http = settings.identity().build_client()?;
        let ports = AccountingClientPorts {
            authorization: Arc::new(HttpAuthorizationServer::with_client(
                http.clone(),
                &settings.oauth_endpoint()?,
            )?),
            ledger: Arc::new(HttpLedgerApi::with_client(http, &settings.api_endpoint()?)?),
        };
        Ok(Self::with_options(credentials, ports, options, token)?)
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, SettingsError> {
    value
        .filter(|supplied| !supplied.is_empty())
        .ok_or(SettingsError::Missing { field })
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|error| invalid(field, error))
}

fn invalid(field: &'static str, error: impl fmt::Display) -> SettingsError {
    SettingsError::Invalid {
        field,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for accounting configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use crate::domain::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};

    const VARS: [&str; 11] = [
        "ACCOUNTING_CLIENT_ID",
        "ACCOUNTING_CLIENT_SECRET",
        "ACCOUNTING_REDIRECT_URI",
        "ACCOUNTING_OAUTH_ENDPOINT",
        "ACCOUNTING_API_ENDPOINT",
        "ACCOUNTING_CONSENT_ENDPOINT",
        "ACCOUNTING_PAGE_SIZE",
        "ACCOUNTING_MAX_PAGES",
        "ACCOUNTING_PAGE_COUNT_POLICY",
        "ACCOUNTING_REQUEST_TIMEOUT_SECS",
        "ACCOUNTING_USER_AGENT",
    ];

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> AccountingSettings {
        AccountingSettings::load_from_iter([OsString::from("accounting-client")])
            .expect("config should load")
    }

    fn empty_settings() -> AccountingSettings {
        AccountingSettings {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            oauth_endpoint: None,
            api_endpoint: None,
            consent_endpoint: None,
            page_size: DEFAULT_PAGE_SIZE.get(),
            max_pages: DEFAULT_MAX_PAGES,
            page_count_policy: None,
            request_timeout_secs: None,
            user_agent: None,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.credentials(),
            Err(SettingsError::Missing { field: "client_id" })
        ));
        assert_eq!(
            settings.oauth_endpoint().expect("default url").as_str(),
            "https://oauth.accounting.sage.com/"
        );
        assert_eq!(
            settings.api_endpoint().expect("default url").as_str(),
            DEFAULT_API_ENDPOINT
        );
        assert_eq!(settings.consent_endpoint(), DEFAULT_CONSENT_ENDPOINT);
        assert_eq!(settings.page_size().expect("default size"), DEFAULT_PAGE_SIZE);
        assert_eq!(settings.max_pages().expect("default limit"), DEFAULT_MAX_PAGES);
        assert_eq!(
            settings.page_count_policy().expect("default policy"),
            PageCountPolicy::RoundUp
        );
        assert_eq!(settings.identity(), AccountingHttpIdentity::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("ACCOUNTING_CLIENT_ID", "client-1"),
            ("ACCOUNTING_CLIENT_SECRET", "s3cret"),
            ("ACCOUNTING_REDIRECT_URI", "https://app.test/callback"),
            ("ACCOUNTING_API_ENDPOINT", "http://127.0.0.1:9000/v3.1"),
            ("ACCOUNTING_PAGE_SIZE", "50"),
            ("ACCOUNTING_MAX_PAGES", "20"),
            ("ACCOUNTING_PAGE_COUNT_POLICY", "legacy"),
            ("ACCOUNTING_REQUEST_TIMEOUT_SECS", "5"),
            ("ACCOUNTING_USER_AGENT", "ledger-sync/2.0"),
        ]));

        let settings = load_from_empty_args();
        let credentials = settings.credentials().expect("credentials present");
        assert_eq!(credentials.client_id(), "client-1");
        assert_eq!(credentials.client_secret(), "s3cret");
        assert_eq!(credentials.redirect_uri(), "https://app.test/callback");
        assert_eq!(
            settings.api_endpoint().expect("valid url").path(),
            "/v3.1"
        );
        assert_eq!(settings.page_size().expect("valid size").get(), 50);
        assert_eq!(settings.max_pages().expect("valid limit"), 20);
        assert_eq!(
            settings.page_count_policy().expect("valid policy"),
            PageCountPolicy::Legacy
        );
        let identity = settings.identity();
        assert_eq!(identity.user_agent, "ledger-sync/2.0");
        assert_eq!(identity.timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case::zero_page_size(
        AccountingSettings { page_size: 0, ..empty_settings() },
        "page_size"
    )]
    #[case::zero_max_pages(
        AccountingSettings { max_pages: 0, ..empty_settings() },
        "max_pages"
    )]
    #[case::unknown_policy(
        AccountingSettings { page_count_policy: Some("sideways".into()), ..empty_settings() },
        "page_count_policy"
    )]
    #[case::bad_api_endpoint(
        AccountingSettings { api_endpoint: Some("not a url".into()), ..empty_settings() },
        "api_endpoint"
    )]
    fn malformed_values_are_rejected(#[case] settings: AccountingSettings, #[case] expected: &str) {
        let error = settings
            .page_size()
            .and(settings.max_pages())
            .and(settings.page_count_policy())
            .and(settings.api_endpoint())
            .expect_err("malformed value");
        assert!(
            matches!(&error, SettingsError::Invalid { field, .. } if *field == expected),
            "unexpected error: {error:?}"
        );
    }

    #[rstest]
    fn empty_credentials_count_as_missing() {
        let settings = AccountingSettings {
            client_id: Some("client-1".into()),
            client_secret: Some(String::new()),
            redirect_uri: Some("https://app.test/callback".into()),
            ..empty_settings()
        };
        assert!(matches!(
            settings.credentials(),
            Err(SettingsError::Missing {
                field: "client_secret"
            })
        ));
    }

    #[rstest]
    fn debug_output_redacts_secret() {
        let settings = AccountingSettings {
            client_secret: Some("s3cret".into()),
            ..empty_settings()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn from_settings_builds_an_unauthenticated_client() {
        let settings = AccountingSettings {
            client_id: Some("client-1".into()),
            client_secret: Some("s3cret".into()),
            redirect_uri: Some("https://app.test/callback".into()),
            ..empty_settings()
        };
        let client = AccountingClient::from_settings(&settings, None).expect("client builds");
        assert!(!client.is_authenticated().await);
        assert!(client.consent_url().starts_with(DEFAULT_CONSENT_ENDPOINT));
    }

    #[rstest]
    fn from_settings_rejects_invalid_token() {
        let settings = AccountingSettings {
            client_id: Some("client-1".into()),
            client_secret: Some("s3cret".into()),
            redirect_uri: Some("https://app.test/callback".into()),
            ..empty_settings()
        };
        let result = AccountingClient::from_settings(&settings, Some(TokenData::default()));
        assert!(matches!(
            result,
            Err(SettingsError::Client(AccountingError::InvalidTokenData))
        ));
    }
}
