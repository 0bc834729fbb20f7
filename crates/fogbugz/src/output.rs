//! Presentation layer: tables, leveled messages, clean/quoted output, and
//! the per-case progress indicator. Rendering is split from printing so the
//! formats can be tested without capturing stdout.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{AnsiColors, OwoColorize};

use fogbugz_core::{Case, CliConfig};

pub const CASE_HEADINGS: &[&str] = &["BugID", "Status", "Title", "Assigned To"];

/// Column cells wider than this are cut with an ellipsis.
pub const CELL_LIMIT: usize = 45;

#[derive(Debug, Clone, Copy)]
pub enum Level {
    Error,
    Warn,
    Success,
    Info,
}

/// One table cell: text plus an optional color applied after padding, so
/// escape sequences never skew column widths.
pub struct Cell {
    text: String,
    color: Option<AnsiColors>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: AnsiColors) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

pub struct Printer {
    colorize: bool,
    clean: bool,
    error: AnsiColors,
    warn: AnsiColors,
    success: AnsiColors,
    active: AnsiColors,
}

impl Printer {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            colorize: config.output.colorize,
            clean: config.output.clean,
            error: parse_color(&config.colors.error),
            warn: parse_color(&config.colors.warn),
            success: parse_color(&config.colors.success),
            active: parse_color(&config.colors.active),
        }
    }

    pub fn message(&self, text: &str, level: Level) {
        println!("\n{}", self.render_message(text, level));
    }

    pub fn table(&self, headings: &[&str], rows: Vec<Vec<Cell>>) {
        print!("{}", self.render_table(headings, &rows));
    }

    pub fn show_cases(&self, cases: &[Case]) {
        print!("{}", self.render_cases(cases));
    }

    fn render_message(&self, text: &str, level: Level) -> String {
        if !self.colorize {
            return text.to_string();
        }
        match level {
            Level::Error => text.color(self.error).to_string(),
            Level::Warn => text.color(self.warn).to_string(),
            Level::Success => text.color(self.success).to_string(),
            Level::Info => text.to_string(),
        }
    }

    fn render_cases(&self, cases: &[Case]) -> String {
        if cases.is_empty() {
            return format!(
                "\n{}\n",
                self.render_message(
                    "No open cases were found that match your query.",
                    Level::Warn
                )
            );
        }
        let rows = cases
            .iter()
            .map(|case| {
                let status = if case.status == "Active" {
                    Cell::colored(case.status.clone(), self.active)
                } else {
                    Cell::plain(case.status.clone())
                };
                vec![
                    Cell::plain(case.id.to_string()),
                    status,
                    Cell::plain(case.title.clone()),
                    Cell::plain(case.assigned_to.clone()),
                ]
            })
            .collect::<Vec<_>>();
        self.render_table(CASE_HEADINGS, &rows)
    }

    fn render_table(&self, headings: &[&str], rows: &[Vec<Cell>]) -> String {
        if self.clean {
            let mut out = String::new();
            for row in rows {
                let quoted: Vec<String> = row
                    .iter()
                    .map(|cell| format!("\"{}\"", cell.text))
                    .collect();
                out.push_str(&quoted.join(","));
                out.push('\n');
            }
            return out;
        }

        let mut widths: Vec<usize> = headings.iter().map(|heading| heading.len()).collect();
        for row in rows {
            for (index, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(index) {
                    *width = (*width).max(cell.text.chars().count());
                }
            }
        }

        let mut out = String::new();
        let header: Vec<String> = headings
            .iter()
            .zip(&widths)
            .map(|(heading, width)| {
                let width = *width;
                format!("{heading:<width$}")
            })
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"─".repeat(rule_width));
        out.push('\n');

        for row in rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(index, cell)| {
                    let width = widths.get(index).copied().unwrap_or(0);
                    let padded = format!("{:<width$}", cell.text);
                    match cell.color {
                        Some(color) if self.colorize => padded.color(color).to_string(),
                        _ => padded,
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

/// Per-case progress wrapper for mutation batches. Presentation only: the
/// iteration order and abort-on-first-failure semantics match the plain
/// batch functions.
pub fn with_progress<F>(
    cases: &[Case],
    label: &str,
    mut op: F,
) -> fogbugz_core::Result<Vec<u32>>
where
    F: FnMut(&Case) -> fogbugz_core::Result<u32>,
{
    let bar = ProgressBar::new(cases.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:24}] {pos}/{len}")
            .expect("valid template"),
    );
    bar.enable_steady_tick(Duration::from_millis(80));

    let mut ids = Vec::with_capacity(cases.len());
    for case in cases {
        bar.set_message(format!("{label} case {}", case.id));
        match op(case) {
            Ok(id) => {
                ids.push(id);
                bar.inc(1);
            }
            Err(err) => {
                bar.finish_and_clear();
                return Err(err);
            }
        }
    }
    bar.finish_and_clear();
    Ok(ids)
}

pub fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cut a cell to `max` characters, marking the cut with an ellipsis.
pub fn truncate_cell(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

fn parse_color(name: &str) -> AnsiColors {
    match name.to_ascii_lowercase().as_str() {
        "black" => AnsiColors::Black,
        "red" => AnsiColors::Red,
        "green" => AnsiColors::Green,
        "yellow" => AnsiColors::Yellow,
        "blue" => AnsiColors::Blue,
        "magenta" => AnsiColors::Magenta,
        "cyan" => AnsiColors::Cyan,
        "white" => AnsiColors::White,
        _ => AnsiColors::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(colorize: bool, clean: bool) -> Printer {
        let mut config = CliConfig::default();
        config.output.colorize = colorize;
        config.output.clean = clean;
        Printer::new(&config)
    }

    fn sample_case(id: u32, status: &str) -> Case {
        Case {
            id,
            parent_id: None,
            open: status == "Active",
            title: format!("Case {id}"),
            assigned_to: "Ada".to_string(),
            assigned_to_email: "ada@example.com".to_string(),
            status: status.to_string(),
            status_id: None,
            category_id: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn zero_cases_render_the_no_match_message() {
        let out = printer(false, false).render_cases(&[]);
        assert!(out.contains("No open cases were found that match your query."));
    }

    #[test]
    fn table_columns_align_to_the_widest_cell() {
        let out = printer(false, false).render_table(
            &["ID", "Title"],
            &[
                vec![Cell::plain("12"), Cell::plain("short")],
                vec![Cell::plain("556"), Cell::plain("a longer title")],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID   Title");
        assert_eq!(lines[2], "12   short");
        assert_eq!(lines[3], "556  a longer title");
    }

    #[test]
    fn clean_mode_prints_quoted_rows_without_headings() {
        let out = printer(false, true).render_table(
            &["ID", "Title"],
            &[vec![Cell::plain("12"), Cell::plain("short")]],
        );
        assert_eq!(out, "\"12\",\"short\"\n");
    }

    #[test]
    fn active_status_is_colorized_when_enabled() {
        let out = printer(true, false).render_cases(&[sample_case(12, "Active")]);
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn colors_are_suppressed_when_disabled() {
        let out = printer(false, false).render_cases(&[sample_case(12, "Active")]);
        assert!(!out.contains("\u{1b}["));
        let message = printer(false, false).render_message("careful", Level::Warn);
        assert_eq!(message, "careful");
    }

    #[test]
    fn messages_are_colorized_by_level() {
        let message = printer(true, false).render_message("done", Level::Success);
        assert!(message.contains("\u{1b}["));
    }

    #[test]
    fn join_ids_is_comma_separated() {
        assert_eq!(join_ids(&[12, 25, 556]), "12, 25, 556");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn truncate_cell_marks_the_cut() {
        assert_eq!(truncate_cell("short", 45), "short");
        let long = "x".repeat(50);
        let cut = truncate_cell(&long, 45);
        assert_eq!(cut.chars().count(), 48);
        assert!(cut.ends_with("..."));
    }
}
