use anyhow::Result;
use fogbugz_core::{self as core, query, CliConfig};

use crate::commands::{connect, rows_or_report, CLI_NEGATION};
use crate::output::{self, Level, Printer};

pub fn run(
    config: &CliConfig,
    printer: &Printer,
    terms: Vec<String>,
    close: bool,
    status: u32,
) -> Result<()> {
    if terms.is_empty() {
        printer.message("You must provide a search query.", Level::Error);
        std::process::exit(1);
    }
    let query = query::build_query(&terms, CLI_NEGATION);

    let mut session = connect(config)?;
    let client = session.client()?;

    // Only open cases assigned to the caller are eligible.
    let cases = rows_or_report(
        core::search_open(&client, &query, config.default_columns(), true),
        printer,
    )?;
    if cases.is_empty() {
        printer.message(
            "No open cases were found that match that query.",
            Level::Warn,
        );
        return Ok(());
    }

    let resolved = if config.output.progress {
        output::with_progress(&cases, "Resolving", |case| {
            core::resolve_case(&client, case, status)
        })?
    } else {
        core::resolve_cases(&client, &cases, status)?
    };
    printer.message(
        &format!(
            "The following cases were resolved: {}",
            output::join_ids(&resolved)
        ),
        Level::Success,
    );

    if close {
        let closed = if config.output.progress {
            output::with_progress(&cases, "Closing", |case| core::close_case(&client, case))?
        } else {
            core::close_cases(&client, &cases)?
        };
        printer.message(
            &format!(
                "The following cases were closed: {}",
                output::join_ids(&closed)
            ),
            Level::Success,
        );
    }
    Ok(())
}
