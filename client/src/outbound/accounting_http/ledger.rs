//! Reqwest-backed accounting API adapter for ledger accounts and journals.

use async_trait::async_trait;
use pagination::PageRequest;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::dto::{JournalEnvelopeDto, LedgerAccountsPageDto};
use super::transport::{AccountingHttpIdentity, decode_success, endpoint_url, map_transport_error};
use crate::domain::ports::{LedgerAccountPage, LedgerApi};
use crate::domain::{AccountingError, JournalData};

/// Accounting API adapter authenticating every call with a bearer token.
pub struct HttpLedgerApi {
    client: Client,
    ledger_accounts_url: Url,
    journals_url: Url,
}

impl HttpLedgerApi {
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
            ledger_accounts_url: endpoint_url(endpoint, "ledger_accounts")?,
            journals_url: endpoint_url(endpoint, "journals")?,
        })
    }
}

#[async_trait]
impl LedgerApi for HttpLedgerApi {
    async fn fetch_ledger_accounts(
        &self,
        access_token: &str,
        page: PageRequest,
    ) -> Result<LedgerAccountPage, AccountingError> {
        debug!(
            page = page.number(),
            items_per_page = page.size().get(),
            "fetching ledger accounts"
        );
        let response = self
            .client
            .get(self.ledger_accounts_url.clone())
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .query(&ledger_accounts_query(page))
            .send()
            .await
            .map_err(map_transport_error)?;
        let decoded: LedgerAccountsPageDto = decode_success(response, "ledger_accounts").await?;
        Ok(decoded.into_domain_page())
    }

    async fn post_journal(
        &self,
        access_token: &str,
        journal: &JournalData,
    ) -> Result<Value, AccountingError> {
        debug!(date = %journal.date, lines = journal.lines.len(), "posting journal");
        let response = self
            .client
            .post(self.journals_url.clone())
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .json(&JournalEnvelopeDto::from(journal))
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_success(response, "journals").await
    }
}

/// The first page carries no `page` parameter.
fn ledger_accounts_query(page: PageRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("items_per_page", page.size().to_string()),
        ("attributes", "all".to_owned()),
    ];
    if !page.is_first() {
        query.push(("page", page.number().to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    //! Query construction for ledger account pages.

    use super::*;
    use pagination::PageSize;
    use rstest::{fixture, rstest};

    #[fixture]
    fn size() -> PageSize {
        PageSize::new(200).expect("valid size")
    }

    #[rstest]
    fn first_page_omits_page_parameter(size: PageSize) {
        assert_eq!(
            ledger_accounts_query(PageRequest::first(size)),
            vec![
                ("items_per_page", "200".to_owned()),
                ("attributes", "all".to_owned()),
            ]
        );
    }

    #[rstest]
    fn later_pages_carry_their_number(size: PageSize) {
        let page = PageRequest::numbered(3, size).expect("valid page");
        assert_eq!(
            ledger_accounts_query(page),
            vec![
                ("items_per_page", "200".to_owned()),
                ("attributes", "all".to_owned()),
                ("page", "3".to_owned()),
            ]
        );
    }
}
