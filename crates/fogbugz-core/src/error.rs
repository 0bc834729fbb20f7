//! Error taxonomy for the client core.
//!
//! The variants mirror how failures propagate: configuration and
//! authentication problems abort before or at the handshake, remote errors
//! are surfaced verbatim and treated as empty results, and transport
//! failures are kept distinct from remote errors so an aborted mutation
//! batch is diagnosable.

use snafu::prelude::*;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Required connection or credential settings are absent and could not
    /// be obtained, even interactively.
    #[snafu(display("configuration error: {message}"))]
    Configuration { message: String },

    #[snafu(display("failed to read configuration file {}: {source}", path.display()))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("invalid configuration file {}: {source}", path.display()))]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The server rejected the logon handshake.
    #[snafu(display("authentication failed: {message}"))]
    Authentication { message: String },

    /// The response body carried an `<error>` envelope for a
    /// non-authentication reason. The message is the server's, verbatim.
    #[snafu(display("{message}"))]
    Remote { message: String },

    /// Network or connectivity failure while issuing a command. Aborts the
    /// current batch; there is no automatic retry.
    #[snafu(display("network failure during '{command}': {source}"))]
    Transport {
        command: String,
        #[snafu(source(from(ureq::Error, Box::new)))]
        source: Box<ureq::Error>,
    },

    #[snafu(display("failed to read the response body for '{command}': {source}"))]
    ResponseBody {
        command: String,
        source: std::io::Error,
    },

    /// The response body was not the XML the protocol promises.
    #[snafu(display("malformed response: {message}"))]
    Response { message: String },

    #[snafu(display("failed to read input: {source}"))]
    Prompt { source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_is_surfaced_verbatim() {
        let err = Error::Remote {
            message: "Unrecognized command: frobnicate".to_string(),
        };
        assert_eq!(err.to_string(), "Unrecognized command: frobnicate");
    }

    #[test]
    fn authentication_error_names_the_failure() {
        let err = Error::Authentication {
            message: "Incorrect password or username".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "authentication failed: Incorrect password or username"
        );
    }

    #[test]
    fn transport_error_names_the_command() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = Error::ResponseBody {
            command: "resolve".to_string(),
            source: io,
        };
        assert!(err.to_string().contains("'resolve'"));
    }
}
