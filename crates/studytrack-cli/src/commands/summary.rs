//! The `studytrack summary` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::CommandContext;

pub fn execute(
    session: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let ctx = CommandContext::resolve(session, config_path)?;
    let engine = ctx.load_engine()?;

    let summaries = engine.subject_summary();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No results recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Problems", "Score %", "Perfection %"]);

    for summary in &summaries {
        table.add_row(vec![
            Cell::new(&summary.subject),
            Cell::new(summary.count),
            Cell::new(format!("{:.1}", summary.rates.score_rate)),
            Cell::new(format!("{:.1}", summary.rates.perfection_rate)),
        ]);
    }

    println!("{table}");

    if let Some(current) = engine.current_subject() {
        println!("\nCurrent subject: {current}");
    }
    Ok(())
}
