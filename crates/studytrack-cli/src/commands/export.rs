//! The `studytrack export` command.

use std::path::PathBuf;

use anyhow::Result;

use studytrack_report::csv::write_csv_report;

use super::{export_file_name, CommandContext};

pub fn execute(
    session: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output: PathBuf,
    all: bool,
    subject: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::resolve(session, config_path)?;
    let engine = ctx.load_engine()?;

    let tables = if all {
        engine.export_all()?
    } else {
        let subject = match subject.or_else(|| engine.current_subject().map(str::to_string)) {
            Some(s) => s,
            None => anyhow::bail!("no subject selected; pass --subject or --all"),
        };
        vec![engine.export_subject(&subject)?]
    };

    std::fs::create_dir_all(&output)?;
    for table in &tables {
        let path = export_file_name(&output, &table.title);
        write_csv_report(table, &path)?;
        println!("Exported {} rows to: {}", table.rows.len(), path.display());
    }

    Ok(())
}
