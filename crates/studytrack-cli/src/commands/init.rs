//! The `studytrack init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("studytrack.toml").exists() {
        println!("studytrack.toml already exists, skipping.");
    } else {
        std::fs::write("studytrack.toml", SAMPLE_CONFIG)?;
        println!("Created studytrack.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: studytrack subject --name math");
    println!("  2. Run: studytrack record --problem 1 --outcome correct --hesitation smooth");
    println!("  3. Run: studytrack summary");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studytrack configuration

# Where the session snapshot is stored.
session_file = "studytrack-session.json"

# Subject used when none has been selected yet.
# default_subject = "math"
"#;
