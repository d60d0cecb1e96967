//! studytrack CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "studytrack",
    version,
    about = "Classify problem outcomes into study-method groups and track mastery per subject"
)]
struct Cli {
    /// Session file holding subjects and results
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the subject to record under, creating it on first use
    Subject {
        /// Subject name
        #[arg(long)]
        name: String,
    },

    /// Classify one problem outcome
    Record {
        /// Subject to record under (defaults to the session's current subject)
        #[arg(long)]
        subject: Option<String>,

        /// Problem number
        #[arg(long)]
        problem: u32,

        /// Outcome: correct or incorrect
        #[arg(long)]
        outcome: String,

        /// For correct answers: smooth or stalled
        #[arg(long)]
        hesitation: Option<String>,

        /// For incorrect answers: calculation, knowledge, no-approach, or comprehension
        #[arg(long)]
        cause: Option<String>,

        /// For calculation mistakes: first-time or repeated
        #[arg(long)]
        mistake: Option<String>,

        /// For knowledge gaps: basic-recall or applied
        #[arg(long)]
        knowledge: Option<String>,

        /// When no approach came to mind: similar-seen or unseen
        #[arg(long)]
        experience: Option<String>,

        /// For comprehension gaps: term-meaning, language-too-hard, or answer-unclear
        #[arg(long)]
        issue: Option<String>,

        /// Free-text comment
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Show per-subject result counts and mastery rates
    Summary {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Export results as CSV files sorted by study-method group
    Export {
        /// Output directory
        #[arg(long, default_value = "./studytrack-results")]
        output: PathBuf,

        /// Export every subject plus a combined table
        #[arg(long)]
        all: bool,

        /// Subject to export (defaults to the session's current subject)
        #[arg(long)]
        subject: Option<String>,
    },

    /// Import previously exported CSV files
    Import {
        /// CSV files to import
        files: Vec<PathBuf>,
    },

    /// Create a starter studytrack.toml config
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studytrack=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Subject { name } => commands::subject::execute(cli.session, cli.config, name),
        Commands::Record {
            subject,
            problem,
            outcome,
            hesitation,
            cause,
            mistake,
            knowledge,
            experience,
            issue,
            comment,
        } => commands::record::execute(
            cli.session,
            cli.config,
            commands::record::RecordArgs {
                subject,
                problem,
                outcome,
                hesitation,
                cause,
                mistake,
                knowledge,
                experience,
                issue,
                comment,
            },
        ),
        Commands::Summary { format } => commands::summary::execute(cli.session, cli.config, format),
        Commands::Export {
            output,
            all,
            subject,
        } => commands::export::execute(cli.session, cli.config, output, all, subject),
        Commands::Import { files } => commands::import::execute(cli.session, cli.config, files),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
