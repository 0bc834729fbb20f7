//! Session lifecycle.
//!
//! A `Session` is built once per process from the resolved connection
//! settings and passed by reference to whatever needs remote access. The
//! logon handshake runs at most once: the first `client()` call exchanges
//! credentials for a token, every later call (and every session seeded with
//! a pre-obtained token) builds its client from the cached token without
//! re-submitting the password.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Result;

pub struct Session {
    server_url: String,
    email: String,
    password: String,
    token: Option<String>,
}

impl Session {
    pub fn new(
        server_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            email: email.into(),
            password: password.into(),
            token: None,
        }
    }

    /// A session seeded with a pre-obtained token; no handshake will ever
    /// run.
    pub fn with_token(server_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            email: String::new(),
            password: String::new(),
            token: Some(token.into()),
        }
    }

    /// A client for the current session, authenticating on first use.
    pub fn client(&mut self) -> Result<ApiClient> {
        let server_url = self.server_url.clone();
        let token = self.ensure_token(|url, email, password| {
            debug!(server = url, "performing logon handshake");
            ApiClient::anonymous(url).logon(email, password)
        })?;
        Ok(ApiClient::with_token(&server_url, token.to_string()))
    }

    /// Run the handshake unless a token is already cached. The handshake is
    /// injected so the once-per-session invariant is testable offline.
    fn ensure_token(
        &mut self,
        logon: impl FnOnce(&str, &str, &str) -> Result<String>,
    ) -> Result<&str> {
        match self.token {
            Some(ref token) => Ok(token),
            None => {
                let token = logon(&self.server_url, &self.email, &self.password)?;
                Ok(self.token.insert(token))
            }
        }
    }
}
