use anyhow::Result;
use fogbugz_core::query::{PeopleFilter, StatusFilter};
use fogbugz_core::{self as core, fuzzy, CliConfig};

use crate::commands::{connect, rows_or_report};
use crate::output::{truncate_cell, Cell, Level, Printer, CELL_LIMIT};

const LIST_TYPES: &[&str] = &[
    "statuses",
    "people",
    "projects",
    "categories",
    "areas",
    "wikis",
    "mailboxes",
];

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &CliConfig,
    printer: &Printer,
    kind: Option<String>,
    category: Option<u32>,
    resolved: bool,
    all: bool,
    include_active: bool,
    include_normal: bool,
    include_deleted: bool,
    include_community: bool,
    include_virtual: bool,
) -> Result<()> {
    let Some(kind) = kind else {
        printer.message("You should specify a list type.", Level::Warn);
        return Ok(());
    };
    let kind = kind.to_ascii_lowercase();
    if !LIST_TYPES.contains(&kind.as_str()) {
        // Unsupported types are a reported mistake, not a failure.
        let mut message = String::from("This type of list is not supported yet.");
        if let Some(suggestion) = fuzzy::find_best_match(&kind, LIST_TYPES, 0.8) {
            message.push_str(&format!(" Did you mean '{suggestion}'?"));
        }
        printer.message(&message, Level::Error);
        return Ok(());
    }

    let mut session = connect(config)?;
    let client = session.client()?;

    match kind.as_str() {
        "statuses" => {
            let filter = StatusFilter { resolved, category };
            let statuses = rows_or_report(core::list_statuses(&client, &filter), printer)?;
            let rows = statuses
                .iter()
                .map(|status| {
                    vec![
                        Cell::plain(status.name.clone()),
                        Cell::plain(display_id(status.id)),
                        Cell::plain(display_id(status.category_id)),
                    ]
                })
                .collect();
            printer.table(&["Status", "StatusID", "CategoryID"], rows);
        }
        "people" => {
            let filter = PeopleFilter {
                all,
                include_active,
                include_normal,
                include_deleted,
                include_community,
                include_virtual,
            };
            let people = rows_or_report(core::list_people(&client, &filter), printer)?;
            let rows = people
                .iter()
                .map(|person| {
                    vec![
                        Cell::plain(person.full_name.clone()),
                        Cell::plain(truncate_cell(&person.email, CELL_LIMIT)),
                        Cell::plain(person.admin.to_string()),
                        Cell::plain(person.deleted.to_string()),
                        Cell::plain(person.virtual_user.to_string()),
                        Cell::plain(person.last_activity.clone()),
                    ]
                })
                .collect();
            printer.table(
                &["Name", "Email", "Admin?", "Deleted?", "Virtual?", "Last Active"],
                rows,
            );
        }
        "projects" => {
            let projects = rows_or_report(core::list_projects(&client), printer)?;
            let rows = projects
                .iter()
                .map(|project| {
                    vec![
                        Cell::plain(display_id(project.id)),
                        Cell::plain(project.name.clone()),
                        Cell::plain(project.owner.clone()),
                        Cell::plain(project.email.clone()),
                        Cell::plain(project.phone.clone()),
                    ]
                })
                .collect();
            printer.table(&["ID", "Project", "Owner", "Email", "Phone"], rows);
        }
        "categories" => {
            let categories = rows_or_report(core::list_categories(&client), printer)?;
            let rows = categories
                .iter()
                .map(|category| {
                    vec![
                        Cell::plain(display_id(category.id)),
                        Cell::plain(category.plural.clone()),
                    ]
                })
                .collect();
            printer.table(&["ID", "Category"], rows);
        }
        "areas" => {
            let areas = rows_or_report(core::list_areas(&client), printer)?;
            let rows = areas
                .iter()
                .map(|area| {
                    vec![
                        Cell::plain(display_id(area.id)),
                        Cell::plain(area.name.clone()),
                        Cell::plain(area.project.clone()),
                    ]
                })
                .collect();
            printer.table(&["ID", "Area", "Associated Project"], rows);
        }
        "wikis" => {
            let wikis = rows_or_report(core::list_wikis(&client), printer)?;
            let rows = wikis
                .iter()
                .map(|wiki| {
                    let tagline = wiki.tagline.as_deref().unwrap_or("N/A");
                    vec![
                        Cell::plain(display_id(wiki.id)),
                        Cell::plain(wiki.name.clone()),
                        Cell::plain(truncate_cell(tagline, CELL_LIMIT)),
                    ]
                })
                .collect();
            printer.table(&["ID", "Wiki", "Tag Line"], rows);
        }
        "mailboxes" => {
            let mailboxes = rows_or_report(core::list_mailboxes(&client), printer)?;
            let rows = mailboxes
                .iter()
                .map(|mailbox| {
                    vec![
                        Cell::plain(display_id(mailbox.id)),
                        Cell::plain(mailbox.email.clone()),
                        Cell::plain(mailbox.user.clone()),
                    ]
                })
                .collect();
            printer.table(&["ID", "Mailbox", "User"], rows);
        }
        _ => unreachable!("list type validated above"),
    }
    Ok(())
}

fn display_id(id: Option<u32>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}
