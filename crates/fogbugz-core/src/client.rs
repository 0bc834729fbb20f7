//! Remote command client.
//!
//! One GET per command against `{server}/api.asp`, carrying the command
//! name, a flat parameter map, and the session token. The body comes back
//! as raw XML for the response layer to interpret. [`Api`] is the seam the
//! operation engine works against, so tests can substitute canned bodies.

use snafu::ResultExt;
use tracing::debug;

use crate::error::{ResponseBodySnafu, Result, TransportSnafu};
use crate::response;

/// The transport seam: send a named command with parameters, get the raw
/// response body back. Transport failures only; interpreting the body is
/// the caller's concern.
pub trait Api {
    fn invoke(&self, cmd: &str, params: &[(&str, String)]) -> Result<String>;
}

pub struct ApiClient {
    agent: ureq::Agent,
    endpoint: String,
    token: Option<String>,
}

impl ApiClient {
    /// A client with no token, usable only for the logon handshake.
    pub fn anonymous(server_url: &str) -> Self {
        Self::build(server_url, None)
    }

    /// A client identified by a session token.
    pub fn with_token(server_url: &str, token: String) -> Self {
        Self::build(server_url, Some(token))
    }

    fn build(server_url: &str, token: Option<String>) -> Self {
        let endpoint = format!("{}/api.asp", server_url.trim_end_matches('/'));
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint,
            token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchange credentials for a session token.
    pub fn logon(&self, email: &str, password: &str) -> Result<String> {
        let body = self.invoke(
            "logon",
            &[
                ("email", email.to_string()),
                ("password", password.to_string()),
            ],
        )?;
        response::parse_token(&body)
    }
}

impl Api for ApiClient {
    fn invoke(&self, cmd: &str, params: &[(&str, String)]) -> Result<String> {
        debug!(command = cmd, params = params.len(), "issuing API command");
        let mut request = self.agent.get(&self.endpoint).query("cmd", cmd);
        if let Some(token) = self.token.as_deref() {
            request = request.query("token", token);
        }
        for (name, value) in params {
            request = request.query(name, value);
        }
        let response = request.call().context(TransportSnafu { command: cmd })?;
        response
            .into_string()
            .context(ResponseBodySnafu { command: cmd })
    }
}
