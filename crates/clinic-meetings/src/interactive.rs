//! Line-oriented prompt: pick a month, refresh the table, export.
//!
//! Commands, one per line:
//! - `<month>` or `all` — select a month and print its summary
//! - `months` — list months present in the table
//! - `refresh` — drop the cached table and reload it
//! - `export [DIR]` — write the current selection as CSV
//! - `quit` — leave

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use meetings_core::error::MeetingError;
use meetings_core::sequencer::MonthFilter;
use meetings_data::export::export_to_dir;
use meetings_runtime::data_manager::DataManager;

use crate::report;

/// Run the prompt until `quit` or end of input.
///
/// Load failures are reported and nothing is rendered for that command; the
/// user can fix the source and `refresh`.
pub fn run<R: BufRead, W: Write>(
    manager: &mut DataManager,
    mut filter: MonthFilter,
    top_limit: usize,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    render_current(manager, &filter, top_limit, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "refresh" => {
                manager.invalidate_cache();
                render_current(manager, &filter, top_limit, &mut output)?;
            }
            "months" => match manager.get_data(false) {
                Ok(table) => {
                    let names: Vec<&str> = table.months().iter().map(|m| m.as_str()).collect();
                    writeln!(output, "all {}", names.join(" "))?;
                }
                Err(e) => report_failure(manager, &e, &mut output)?,
            },
            "export" => {
                let dir = parts.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
                export_current(manager, &filter, top_limit, &dir, &mut output)?;
            }
            _ => match line.trim().parse::<MonthFilter>() {
                Ok(selected) => {
                    filter = selected;
                    render_current(manager, &filter, top_limit, &mut output)?;
                }
                Err(e) => writeln!(output, "{e}")?,
            },
        }
    }

    Ok(())
}

fn render_current<W: Write>(
    manager: &mut DataManager,
    filter: &MonthFilter,
    top_limit: usize,
    output: &mut W,
) -> anyhow::Result<()> {
    match manager.query(filter, top_limit) {
        Ok(result) => write!(output, "{}", report::render(&result))?,
        Err(e) => report_failure(manager, &e, output)?,
    }
    Ok(())
}

fn export_current<W: Write>(
    manager: &mut DataManager,
    filter: &MonthFilter,
    top_limit: usize,
    dir: &Path,
    output: &mut W,
) -> anyhow::Result<()> {
    let result = match manager.query(filter, top_limit) {
        Ok(result) => result,
        Err(e) => return report_failure(manager, &e, output),
    };
    match export_to_dir(&result.filtered_records, filter, dir) {
        Ok(path) => writeln!(output, "Exportado: {}", path.display())?,
        Err(e) => writeln!(output, "Error: {e}")?,
    }
    Ok(())
}

fn report_failure<W: Write>(
    manager: &DataManager,
    err: &MeetingError,
    output: &mut W,
) -> anyhow::Result<()> {
    let headline = report::load_failure_message(err, manager.data_path());
    writeln!(output, "Error: {headline}: {err}")?;
    Ok(())
}
