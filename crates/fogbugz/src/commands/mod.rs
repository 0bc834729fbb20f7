pub mod close;
pub mod list;
pub mod reopen;
pub mod resolve;
pub mod search;

use anyhow::Result;
use fogbugz_core::{CliConfig, Error, Session};

use crate::output::{Level, Printer};
use crate::prompt;

/// The negation marker accepted on the command line in place of the query
/// grammar's `-`, which would collide with option parsing.
pub(crate) const CLI_NEGATION: &str = "!";

/// Build a session from configuration, prompting for whatever connection
/// settings are missing. No remote call happens here; the logon handshake
/// runs on the session's first use.
pub(crate) fn connect(config: &CliConfig) -> Result<Session> {
    let address = match &config.server.address {
        Some(address) => address.clone(),
        None => prompt::ask("What is the URL of your FogBugz server?")?,
    };
    if let Some(token) = &config.user.token {
        return Ok(Session::with_token(address, token.clone()));
    }
    let email = match &config.user.email {
        Some(email) => email.clone(),
        None => prompt::ask("What is your FogBugz email?")?,
    };
    let password = match &config.user.password {
        Some(password) => password.clone(),
        None => prompt::ask("What is your FogBugz password?")?,
    };
    Ok(Session::new(address, email, password))
}

/// Surface a remote error: print the server's message verbatim and carry on
/// with an empty result set. Every other failure propagates.
pub(crate) fn rows_or_report<T>(
    result: fogbugz_core::Result<Vec<T>>,
    printer: &Printer,
) -> Result<Vec<T>> {
    match result {
        Ok(rows) => Ok(rows),
        Err(Error::Remote { message }) => {
            printer.message(&message, Level::Error);
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}
