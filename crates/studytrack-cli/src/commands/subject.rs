//! The `studytrack subject` command.

use std::path::PathBuf;

use anyhow::Result;

use super::CommandContext;

pub fn execute(
    session: Option<PathBuf>,
    config_path: Option<PathBuf>,
    name: String,
) -> Result<()> {
    let ctx = CommandContext::resolve(session, config_path)?;
    let mut engine = ctx.load_engine()?;

    engine.set_subject(&name)?;
    ctx.save_engine(&engine)?;

    println!("Tracking subject \"{}\".", name.trim());
    Ok(())
}
