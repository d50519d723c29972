//! Error type shared by the accounting client and its driven ports.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the accounting client.
    ///
    /// Nothing is retried internally; callers classify failures themselves,
    /// typically through [`AccountingError::status`].
    pub enum AccountingError {
        /// Caller-supplied token data lacks an access or refresh token.
        InvalidTokenData =>
            "invalid token data: access_token and refresh_token are required",
        /// The authorization callback carried an empty code.
        InvalidCode =>
            "invalid authorization code: code must not be empty",
        /// The remote endpoint answered with a non-success status.
        InvalidHttpResponse { status: u16 } =>
            "invalid response: status {status}",
        /// The response body was absent or not in the expected shape.
        InvalidJsonResponse { message: String } =>
            "invalid json response: {message}",
        /// No token is held; the OAuth flow has not completed.
        InvalidEmptyToken =>
            "invalid empty token: complete the authorization flow first",
        /// The request failed before any response arrived.
        Transport { message: String } =>
            "accounting transport failed: {message}",
        /// The request could not be built.
        InvalidRequest { message: String } =>
            "accounting request invalid: {message}",
    }
}

impl AccountingError {
    /// HTTP status carried by the error, when the remote endpoint answered.
    ///
    /// # Examples
    ///
    /// ```
    /// use accounting_client::AccountingError;
    ///
    /// assert_eq!(AccountingError::invalid_http_response(401_u16).status(), Some(401));
    /// assert_eq!(AccountingError::invalid_code().status(), None);
    /// ```
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidHttpResponse { status } => Some(*status),
            _ => None,
        }
    }
}
