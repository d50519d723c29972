//! OAuth token set issued by the authorization server.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AccountingError;

/// Token set returned by the authorization server's token endpoint.
///
/// The serde shape matches the token endpoint's JSON so callers can persist
/// and later resupply it unchanged. Missing fields decode as empty; use
/// [`TokenData::validate`] before trusting a decoded value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenData {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Long-lived token used to obtain a new access token.
    pub refresh_token: String,
    /// Token type, normally `bearer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Granted scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Access token lifetime in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// Refresh token lifetime in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_in: Option<u64>,
    /// Identifier of the user who granted access.
    #[serde(alias = "request_by_id", skip_serializing_if = "Option::is_none")]
    pub requested_by_id: Option<String>,
}

impl TokenData {
    /// Build a token set holding only the two required tokens.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            ..Self::default()
        }
    }

    /// Whether both the access and refresh tokens are present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }

    /// Return `self` when valid.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError::InvalidTokenData`] when either token is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use accounting_client::{AccountingError, TokenData};
    ///
    /// assert!(TokenData::new("access", "refresh").validate().is_ok());
    /// assert_eq!(
    ///     TokenData::new("access", "").validate(),
    ///     Err(AccountingError::InvalidTokenData)
    /// );
    /// ```
    pub fn validate(self) -> Result<Self, AccountingError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(AccountingError::invalid_token_data())
        }
    }
}

impl fmt::Debug for TokenData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenData")
            .field("access_token", &redacted(&self.access_token))
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("refresh_token_expires_in", &self.refresh_token_expires_in)
            .field("requested_by_id", &self.requested_by_id)
            .finish()
    }
}

const fn redacted(token: &str) -> &'static str {
    if token.is_empty() { "<empty>" } else { "<redacted>" }
}

#[cfg(test)]
mod tests {
    //! Decoding and validation of token payloads.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_token_endpoint_payload() {
        let body = r#"{
            "access_token": "at-1",
            "refresh_token": "rt-1",
            "token_type": "bearer",
            "scope": "full_access",
            "expires_in": 300,
            "refresh_token_expires_in": 2678400,
            "requested_by_id": "user-7"
        }"#;

        let token: TokenData = serde_json::from_str(body).expect("token decodes");
        assert!(token.is_valid());
        assert_eq!(token.expires_in, Some(300));
        assert_eq!(token.requested_by_id.as_deref(), Some("user-7"));
    }

    #[rstest]
    fn accepts_request_by_id_spelling() {
        let body = r#"{"access_token": "a", "refresh_token": "r", "request_by_id": "u"}"#;
        let token: TokenData = serde_json::from_str(body).expect("token decodes");
        assert_eq!(token.requested_by_id.as_deref(), Some("u"));
    }

    #[rstest]
    #[case::missing_access(r#"{"refresh_token": "r"}"#)]
    #[case::missing_refresh(r#"{"access_token": "a"}"#)]
    #[case::empty_access(r#"{"access_token": "", "refresh_token": "r"}"#)]
    fn tokens_without_both_halves_are_invalid(#[case] body: &str) {
        let token: TokenData = serde_json::from_str(body).expect("token decodes");
        assert_eq!(token.validate(), Err(AccountingError::InvalidTokenData));
    }

    #[rstest]
    fn serialising_skips_absent_metadata() {
        let json = serde_json::to_value(TokenData::new("a", "r")).expect("token encodes");
        assert_eq!(
            json,
            serde_json::json!({ "access_token": "a", "refresh_token": "r" })
        );
    }

    #[rstest]
    fn debug_output_hides_tokens() {
        let rendered = format!("{:?}", TokenData::new("secret-access", "secret-refresh"));
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }
}
