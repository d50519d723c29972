//! OAuth client registration.

use std::fmt;

use zeroize::Zeroizing;

/// Client identifier, secret, and redirect URI registered with the
/// authorization server.
///
/// Immutable once built. The secret is wiped on drop and never printed.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: Zeroizing<String>,
    redirect_uri: String,
}

impl Credentials {
    /// Build credentials from their parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use accounting_client::Credentials;
    ///
    /// let credentials = Credentials::new("client-1", "s3cret", "https://app.test/callback");
    /// assert_eq!(credentials.client_id(), "client-1");
    /// assert!(!format!("{credentials:?}").contains("s3cret"));
    /// ```
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// OAuth client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// OAuth client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        self.client_secret.as_str()
    }

    /// Redirect URI the authorization server sends the user back to.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
