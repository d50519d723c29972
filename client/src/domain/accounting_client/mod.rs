//! Accounting client service.
//!
//! The client owns the OAuth credentials and the held token, and delegates
//! every remote call to the driven ports. It adds the two pieces of logic the
//! remote API leaves to callers: token lifecycle checks and draining the
//! paged ledger account listing.

use std::num::NonZeroU32;
use std::sync::Arc;

use futures_util::future::try_join_all;
use pagination::{PageCountPolicy, PagePlan, PageRequest, PageSize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::domain::ports::{AccountingError, AuthorizationServer, LedgerApi};
use crate::domain::{Account, Credentials, JournalData, TokenData};

/// Consent page used when none is configured.
pub const DEFAULT_CONSENT_ENDPOINT: &str = "https://www.sageone.com/oauth2/auth/central";

/// Ledger accounts requested per page when none is configured.
pub const DEFAULT_PAGE_SIZE: PageSize = PageSize::from_non_zero(match NonZeroU32::new(200) {
    Some(size) => size,
    None => NonZeroU32::MIN,
});

/// Largest number of ledger account pages one listing may fetch when none is
/// configured.
pub const DEFAULT_MAX_PAGES: u32 = 1_000;

const CONSENT_FILTER: &str = "apiv3.1";
const CONSENT_SCOPE: &str = "full_access";
const CONSENT_RESPONSE_TYPE: &str = "code";

/// Driven ports the client delegates remote calls to.
#[derive(Clone)]
pub struct AccountingClientPorts {
    /// OAuth2 token endpoint.
    pub authorization: Arc<dyn AuthorizationServer>,
    /// Ledger account and journal endpoints.
    pub ledger: Arc<dyn LedgerApi>,
}

/// Tunables for consent links and account listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountingClientOptions {
    /// Base URL of the browser consent page.
    pub consent_endpoint: String,
    /// Ledger accounts requested per page.
    pub page_size: PageSize,
    /// How follow-up pages are derived from the reported total.
    pub page_count_policy: PageCountPolicy,
    /// Largest number of pages one listing may fetch, including the first.
    pub max_pages: u32,
}

impl Default for AccountingClientOptions {
    fn default() -> Self {
        Self {
            consent_endpoint: DEFAULT_CONSENT_ENDPOINT.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            page_count_policy: PageCountPolicy::default(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Client for the accounting service.
///
/// Starts Unauthenticated unless a token is supplied. The held token is
/// replaced by [`AccountingClient::refresh_token`] and
/// [`AccountingClient::set_token`]; persisting it is the caller's job.
///
/// A refresh holds the token write lock for the whole exchange, so calls
/// sharing one client through an `Arc` never send a token that is being
/// replaced.
pub struct AccountingClient {
    credentials: Credentials,
    consent_endpoint: Url,
    page_size: PageSize,
    page_count_policy: PageCountPolicy,
    max_pages: u32,
    ports: AccountingClientPorts,
    token: RwLock<Option<TokenData>>,
}

impl AccountingClient {
    /// Build a client with default options.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::InvalidTokenData`] when `token` lacks an
    /// access or refresh token.
    pub fn new(
        credentials: Credentials,
        ports: AccountingClientPorts,
        token: Option<TokenData>,
    ) -> Result<Self, AccountingError> {
        Self::with_options(credentials, ports, AccountingClientOptions::default(), token)
    }

    /// Build a client with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::InvalidTokenData`] for an invalid token and
    /// [`AccountingError::InvalidRequest`] when the consent endpoint is not
    /// an absolute URL.
    pub fn with_options(
        credentials: Credentials,
        ports: AccountingClientPorts,
        options: AccountingClientOptions,
        token: Option<TokenData>,
    ) -> Result<Self, AccountingError> {
        let held = token.map(TokenData::validate).transpose()?;
        let consent_endpoint = Url::parse(&options.consent_endpoint).map_err(|error| {
            AccountingError::invalid_request(format!(
                "consent endpoint '{}' is not a valid URL: {error}",
                options.consent_endpoint
            ))
        })?;
        Ok(Self {
            credentials,
            consent_endpoint,
            page_size: options.page_size,
            page_count_policy: options.page_count_policy,
            max_pages: options.max_pages,
            ports,
            token: RwLock::new(held),
        })
    }

    /// Credentials the client was built with.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Browser URL that asks the user to grant full access to this client.
    ///
    /// Query values are percent-encoded; decoding them yields the client id
    /// and redirect URI exactly as supplied.
    #[must_use]
    pub fn consent_url(&self) -> String {
        let mut url = self.consent_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("filter", CONSENT_FILTER)
            .append_pair("response_type", CONSENT_RESPONSE_TYPE)
            .append_pair("scope", CONSENT_SCOPE)
            .append_pair("redirect_uri", self.credentials.redirect_uri())
            .append_pair("client_id", self.credentials.client_id());
        url.into()
    }

    /// Exchange the code from the consent redirect for a token set.
    ///
    /// The client's held token is left untouched; pass the result to
    /// [`AccountingClient::set_token`] or a new client once persisted.
    ///
    /// # Errors
    ///
    /// - [`AccountingError::InvalidCode`] for an empty code, before any
    ///   network call.
    /// - [`AccountingError::InvalidHttpResponse`] for a non-success status.
    /// - [`AccountingError::InvalidJsonResponse`] when the body is not a
    ///   token set with both tokens.
    #[tracing::instrument(skip_all)]
    pub async fn process_callback(&self, code: &str) -> Result<TokenData, AccountingError> {
        if code.is_empty() {
            return Err(AccountingError::invalid_code());
        }
        let token = self
            .ports
            .authorization
            .exchange_code(&self.credentials, code)
            .await?;
        require_both_tokens(token)
    }

    /// Replace the held token using its refresh token, and return the new one.
    ///
    /// # Errors
    ///
    /// - [`AccountingError::InvalidEmptyToken`] when no token is held.
    /// - [`AccountingError::InvalidHttpResponse`] for a non-success status.
    /// - [`AccountingError::InvalidJsonResponse`] when the body is not a
    ///   token set with both tokens.
    ///
    /// The held token is unchanged on error.
    #[tracing::instrument(skip_all)]
    pub async fn refresh_token(&self) -> Result<TokenData, AccountingError> {
        let mut held = self.token.write().await;
        let refresh_token = held
            .as_ref()
            .map(|token| token.refresh_token.clone())
            .ok_or_else(AccountingError::invalid_empty_token)?;
        let refreshed = self
            .ports
            .authorization
            .refresh(&self.credentials, &refresh_token)
            .await
            .and_then(require_both_tokens)?;
        *held = Some(refreshed.clone());
        debug!(expires_in = ?refreshed.expires_in, "access token refreshed");
        Ok(refreshed)
    }

    /// Copy of the held token, if any.
    pub async fn token(&self) -> Option<TokenData> {
        self.token.read().await.clone()
    }

    /// Whether a token is held. Expiry is not checked.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Hold `token` from now on, typically the result of
    /// [`AccountingClient::process_callback`].
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::InvalidTokenData`] when `token` lacks an
    /// access or refresh token; the held token is then unchanged.
    pub async fn set_token(&self, token: TokenData) -> Result<(), AccountingError> {
        let validated = token.validate()?;
        *self.token.write().await = Some(validated);
        Ok(())
    }

    /// Every ledger account, drained across pages.
    ///
    /// Page one is fetched first; the remaining pages planned from its
    /// reported total are fetched concurrently. Accounts are returned in page
    /// order. Any failed page fails the whole call.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::InvalidEmptyToken`] when unauthenticated,
    /// [`AccountingError::InvalidRequest`] when the reported total needs more
    /// pages than the configured limit, otherwise the first error raised by
    /// any page request.
    #[tracing::instrument(skip_all, fields(page_size = self.page_size.get()))]
    pub async fn get_accounts(&self) -> Result<Vec<Account>, AccountingError> {
        let access_token = self.access_token().await?;
        let ledger = self.ports.ledger.as_ref();

        let first = ledger
            .fetch_ledger_accounts(&access_token, PageRequest::first(self.page_size))
            .await?;
        let plan = PagePlan::from_total(first.total, self.page_size, self.page_count_policy)
            .and_then(|planned| planned.within_limit(self.max_pages))
            .map_err(|error| AccountingError::invalid_request(error.to_string()))?;
        debug!(
            total = first.total,
            pages = plan.page_count(),
            policy = %self.page_count_policy,
            "planned ledger account pages"
        );

        let follow_ups = try_join_all(
            plan.follow_ups()
                .map(|page| ledger.fetch_ledger_accounts(&access_token, page)),
        )
        .await?;

        let mut accounts = first.accounts;
        accounts.extend(follow_ups.into_iter().flat_map(|page| page.accounts));
        Ok(accounts)
    }

    /// Post a journal and return the remote response body.
    ///
    /// Lines are sent as debit/credit pairs derived from each amount's sign.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::InvalidEmptyToken`] when unauthenticated,
    /// otherwise whatever the ledger port raises.
    #[tracing::instrument(skip_all, fields(lines = journal.lines.len()))]
    pub async fn create_journal(&self, journal: &JournalData) -> Result<Value, AccountingError> {
        let access_token = self.access_token().await?;
        self.ports.ledger.post_journal(&access_token, journal).await
    }

    async fn access_token(&self) -> Result<String, AccountingError> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|token| token.access_token.clone())
            .ok_or_else(AccountingError::invalid_empty_token)
    }
}

fn require_both_tokens(token: TokenData) -> Result<TokenData, AccountingError> {
    if token.is_valid() {
        Ok(token)
    } else {
        Err(AccountingError::invalid_json_response(
            "token response lacks access_token or refresh_token",
        ))
    }
}
