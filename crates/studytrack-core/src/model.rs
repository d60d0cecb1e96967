//! Core data model types for studytrack.
//!
//! These are the fundamental types used to represent a learner's submitted
//! answer outcome, the stored classification result, and a subject's result
//! set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::classify::Group;

/// Whether the learner answered the problem correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correctness {
    Correct,
    Incorrect,
}

impl fmt::Display for Correctness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correctness::Correct => write!(f, "correct"),
            Correctness::Incorrect => write!(f, "incorrect"),
        }
    }
}

impl FromStr for Correctness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correct" => Ok(Correctness::Correct),
            "incorrect" | "wrong" => Ok(Correctness::Incorrect),
            other => Err(format!("unknown correctness: {other}")),
        }
    }
}

/// How the solving process went for a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hesitation {
    /// Solved smoothly from start to finish.
    Smooth,
    /// The learner's hand stopped partway through.
    Stalled,
}

impl fmt::Display for Hesitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hesitation::Smooth => write!(f, "smooth"),
            Hesitation::Stalled => write!(f, "stalled"),
        }
    }
}

impl FromStr for Hesitation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smooth" => Ok(Hesitation::Smooth),
            "stalled" | "hesitated" => Ok(Hesitation::Stalled),
            other => Err(format!("unknown hesitation: {other}")),
        }
    }
}

/// Root cause selected for an incorrect answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cause {
    /// Calculation or careless mistake.
    Calculation,
    /// Missing knowledge.
    Knowledge,
    /// No solution method came to mind.
    NoApproach,
    /// Did not understand the problem statement.
    Comprehension,
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Calculation => write!(f, "calculation"),
            Cause::Knowledge => write!(f, "knowledge"),
            Cause::NoApproach => write!(f, "no-approach"),
            Cause::Comprehension => write!(f, "comprehension"),
        }
    }
}

impl FromStr for Cause {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calculation" | "careless" => Ok(Cause::Calculation),
            "knowledge" => Ok(Cause::Knowledge),
            "no-approach" | "no-idea" => Ok(Cause::NoApproach),
            "comprehension" => Ok(Cause::Comprehension),
            other => Err(format!("unknown cause: {other}")),
        }
    }
}

/// Whether a calculation mistake is part of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MistakePattern {
    /// First time making this mistake.
    FirstTime,
    /// The same mistake keeps recurring.
    Repeated,
}

impl fmt::Display for MistakePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MistakePattern::FirstTime => write!(f, "first-time"),
            MistakePattern::Repeated => write!(f, "repeated"),
        }
    }
}

impl FromStr for MistakePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-time" | "first" => Ok(MistakePattern::FirstTime),
            "repeated" => Ok(MistakePattern::Repeated),
            other => Err(format!("unknown mistake pattern: {other}")),
        }
    }
}

/// Which level of knowledge was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnowledgeDepth {
    /// A basic fact that should have been memorized.
    BasicRecall,
    /// Applied knowledge beyond the basics.
    Applied,
}

impl fmt::Display for KnowledgeDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeDepth::BasicRecall => write!(f, "basic-recall"),
            KnowledgeDepth::Applied => write!(f, "applied"),
        }
    }
}

impl FromStr for KnowledgeDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic-recall" | "basic" => Ok(KnowledgeDepth::BasicRecall),
            "applied" => Ok(KnowledgeDepth::Applied),
            other => Err(format!("unknown knowledge depth: {other}")),
        }
    }
}

/// Prior exposure to the solution method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodExperience {
    /// Has solved similar problems before.
    SimilarSeen,
    /// No experience with this kind of problem.
    Unseen,
}

impl fmt::Display for MethodExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodExperience::SimilarSeen => write!(f, "similar-seen"),
            MethodExperience::Unseen => write!(f, "unseen"),
        }
    }
}

impl FromStr for MethodExperience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "similar-seen" | "seen" => Ok(MethodExperience::SimilarSeen),
            "unseen" | "none" => Ok(MethodExperience::Unseen),
            other => Err(format!("unknown method experience: {other}")),
        }
    }
}

/// What exactly the learner could not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComprehensionIssue {
    /// The meaning of a term was unknown.
    TermMeaning,
    /// The wording of the problem was too hard.
    LanguageTooHard,
    /// Even the published answer made no sense.
    AnswerUnclear,
}

impl fmt::Display for ComprehensionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComprehensionIssue::TermMeaning => write!(f, "term-meaning"),
            ComprehensionIssue::LanguageTooHard => write!(f, "language-too-hard"),
            ComprehensionIssue::AnswerUnclear => write!(f, "answer-unclear"),
        }
    }
}

impl FromStr for ComprehensionIssue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "term-meaning" | "term" => Ok(ComprehensionIssue::TermMeaning),
            "language-too-hard" | "language" => Ok(ComprehensionIssue::LanguageTooHard),
            "answer-unclear" | "answer" => Ok(ComprehensionIssue::AnswerUnclear),
            other => Err(format!("unknown comprehension issue: {other}")),
        }
    }
}

/// A raw answer submission as supplied by the UI layer.
///
/// Every field except `comment` is optional at this stage; validation into a
/// complete [`crate::classify::Assessment`] happens when the report is
/// classified, so that each missing selection can be reported by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemReport {
    /// Positive problem identifier, unique within a subject.
    #[serde(default)]
    pub problem_number: Option<u32>,
    /// Whether the answer was correct.
    #[serde(default)]
    pub correctness: Option<Correctness>,
    /// Solving-process selection for correct answers.
    #[serde(default)]
    pub hesitation: Option<Hesitation>,
    /// Root-cause selection for incorrect answers.
    #[serde(default)]
    pub cause: Option<Cause>,
    /// Follow-up selection when the cause is a calculation mistake.
    #[serde(default)]
    pub mistake: Option<MistakePattern>,
    /// Follow-up selection when the cause is missing knowledge.
    #[serde(default)]
    pub knowledge: Option<KnowledgeDepth>,
    /// Follow-up selection when no solution method came to mind.
    #[serde(default)]
    pub experience: Option<MethodExperience>,
    /// Follow-up selection when the problem was not understood.
    #[serde(default)]
    pub issue: Option<ComprehensionIssue>,
    /// Free-text comment attached to the result.
    #[serde(default)]
    pub comment: String,
}

/// One classified result, as stored per subject and exported per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Problem identifier, unique within the owning subject's live set.
    pub problem_number: u32,
    /// Classification outcome.
    pub group: Group,
    /// Canonical remediation text for the group.
    pub method_text: String,
    /// System comparison note or caller-supplied comment; may be empty.
    #[serde(default)]
    pub comment: String,
    /// Owning subject, denormalized for export.
    pub subject: String,
}

/// A named partition of results.
///
/// Record order is most-recent-write order: a resubmission removes the old
/// entry and appends the new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name, non-empty and unique within the engine.
    pub name: String,
    /// The subject's live result set.
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

impl Subject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
        }
    }
}
