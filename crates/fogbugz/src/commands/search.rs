use anyhow::Result;
use fogbugz_core::{self as core, query, CliConfig};

use crate::commands::{connect, rows_or_report, CLI_NEGATION};
use crate::output::Printer;

pub fn run(config: &CliConfig, printer: &Printer, terms: Vec<String>) -> Result<()> {
    // No terms is fine: the server answers an empty query with the
    // caller's current case list.
    let query = query::build_query(&terms, CLI_NEGATION);

    let mut session = connect(config)?;
    let client = session.client()?;
    let cases = rows_or_report(
        core::search_all(&client, &query, config.default_columns(), false),
        printer,
    )?;

    printer.show_cases(&cases);
    Ok(())
}
