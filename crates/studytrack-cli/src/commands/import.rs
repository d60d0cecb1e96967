//! The `studytrack import` command.

use std::path::PathBuf;

use anyhow::Result;

use studytrack_core::tabular::TabularData;
use studytrack_report::csv::read_csv_report;

use super::CommandContext;

pub fn execute(
    session: Option<PathBuf>,
    config_path: Option<PathBuf>,
    files: Vec<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(!files.is_empty(), "no files given to import");

    let ctx = CommandContext::resolve(session, config_path)?;
    let mut engine = ctx.load_engine()?;

    // Unreadable files are skipped like malformed tables; the engine decides
    // whether anything at all was imported.
    let mut tables: Vec<TabularData> = Vec::new();
    for file in &files {
        let title = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import".to_string());
        match read_csv_report(file, &title) {
            Ok(table) => tables.push(table),
            Err(e) => tracing::warn!("skipping {}: {e:#}", file.display()),
        }
    }

    let summary = engine.import_tabular(&tables)?;
    ctx.save_engine(&engine)?;

    println!(
        "Imported {} row(s) into {} subject(s): {}",
        summary.rows_imported,
        summary.subjects_touched.len(),
        summary.subjects_touched.join(", ")
    );
    Ok(())
}
