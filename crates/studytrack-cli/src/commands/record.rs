//! The `studytrack record` command.

use std::path::PathBuf;

use anyhow::Result;

use studytrack_core::model::{
    Cause, ComprehensionIssue, Correctness, Hesitation, KnowledgeDepth, MethodExperience,
    MistakePattern, ProblemReport,
};

use super::{parse_selection, CommandContext};

/// Raw selections from the command line.
pub struct RecordArgs {
    pub subject: Option<String>,
    pub problem: u32,
    pub outcome: String,
    pub hesitation: Option<String>,
    pub cause: Option<String>,
    pub mistake: Option<String>,
    pub knowledge: Option<String>,
    pub experience: Option<String>,
    pub issue: Option<String>,
    pub comment: String,
}

pub fn execute(
    session: Option<PathBuf>,
    config_path: Option<PathBuf>,
    args: RecordArgs,
) -> Result<()> {
    let ctx = CommandContext::resolve(session, config_path)?;
    let mut engine = ctx.load_engine()?;

    // Subject precedence: flag, then session, then config default.
    let subject = match args
        .subject
        .or_else(|| engine.current_subject().map(str::to_string))
        .or_else(|| ctx.config.default_subject.clone())
    {
        Some(s) => s,
        None => anyhow::bail!(
            "no subject selected; run `studytrack subject --name <name>` or pass --subject"
        ),
    };
    engine.set_subject(&subject)?;

    let correctness = args
        .outcome
        .parse::<Correctness>()
        .map_err(|e| anyhow::anyhow!("--outcome: {e}"))?;

    let report = ProblemReport {
        problem_number: Some(args.problem),
        correctness: Some(correctness),
        hesitation: parse_selection::<Hesitation>(args.hesitation.as_deref(), "hesitation")?,
        cause: parse_selection::<Cause>(args.cause.as_deref(), "cause")?,
        mistake: parse_selection::<MistakePattern>(args.mistake.as_deref(), "mistake")?,
        knowledge: parse_selection::<KnowledgeDepth>(args.knowledge.as_deref(), "knowledge")?,
        experience: parse_selection::<MethodExperience>(
            args.experience.as_deref(),
            "experience",
        )?,
        issue: parse_selection::<ComprehensionIssue>(args.issue.as_deref(), "issue")?,
        comment: args.comment,
    };

    let outcome = engine.classify(&subject, &report)?;
    ctx.save_engine(&engine)?;

    println!("{}", outcome.render());
    Ok(())
}
