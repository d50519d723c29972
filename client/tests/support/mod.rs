//! Shared helpers for the HTTP adapter integration tests.

use std::sync::Arc;

use accounting_client::outbound::accounting_http::{
    AccountingHttpIdentity, HttpAuthorizationServer, HttpLedgerApi,
};
use accounting_client::{
    AccountingClient, AccountingClientOptions, AccountingClientPorts, Credentials, TokenData,
};
use httpmock::MockServer;
use url::Url;

pub const CLIENT_ID: &str = "client-1";
pub const CLIENT_SECRET: &str = "s3cret";
pub const REDIRECT_URI: &str = "https://app.test/callback";
pub const API_BASE_PATH: &str = "/v3.1";

pub fn credentials() -> Credentials {
    Credentials::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URI)
}

pub fn token(access: &str, refresh: &str) -> TokenData {
    TokenData::new(access, refresh)
}

/// Client whose token endpoint lives at the server root and whose API lives
/// under [`API_BASE_PATH`].
pub fn client_for(
    server: &MockServer,
    options: AccountingClientOptions,
    token: Option<TokenData>,
) -> AccountingClient {
    let http = AccountingHttpIdentity::default()
        .build_client()
        .expect("http client");
    let oauth = Url::parse(&server.base_url()).expect("oauth url");
    let api = Url::parse(&server.url(API_BASE_PATH)).expect("api url");
    let ports = AccountingClientPorts {
        authorization: Arc::new(
            HttpAuthorizationServer::with_client(http.clone(), &oauth).expect("oauth adapter"),
        ),
        ledger: Arc::new(HttpLedgerApi::with_client(http, &api).expect("ledger adapter")),
    };
    AccountingClient::with_options(credentials(), ports, options, token).expect("client")
}

pub fn authenticated_client(server: &MockServer, access: &str) -> AccountingClient {
    client_for(
        server,
        AccountingClientOptions::default(),
        Some(token(access, "refresh-1")),
    )
}

pub fn api_path(segment: &str) -> String {
    format!("{API_BASE_PATH}/{segment}")
}
