//! The remediation decision tree.
//!
//! A submitted [`ProblemReport`] is validated into an [`Assessment`], a tagged
//! union over the answer-form selections. The mapping from assessment to
//! remediation group is a total function, so every valid combination lands in
//! exactly one of the eleven groups and nothing falls through to a default.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{
    Cause, ComprehensionIssue, Correctness, Hesitation, KnowledgeDepth, MethodExperience,
    MistakePattern, ProblemReport,
};

/// One of the eleven fixed remediation categories.
///
/// Construction is checked: ids outside `1..=11` are rejected at the
/// boundary, so a `Group` held anywhere downstream is always valid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Group(u8);

impl Group {
    /// Number of remediation categories.
    pub const COUNT: u8 = 11;

    /// Checked constructor; `None` for ids outside `1..=11`.
    pub fn new(id: u8) -> Option<Group> {
        (1..=Self::COUNT).contains(&id).then_some(Group(id))
    }

    /// The group id in `1..=11`.
    pub fn id(self) -> u8 {
        self.0
    }

    /// Groups 1 and 2: the answer scored.
    pub fn is_mastered(self) -> bool {
        self.0 <= 2
    }

    /// Group 1 alone: solved smoothly and correctly.
    pub fn is_perfect(self) -> bool {
        self.0 == 1
    }

    /// Canonical remediation text for this group.
    pub fn method_text(self) -> &'static str {
        METHOD_TEXTS[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for Group {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Group::new(id).ok_or_else(|| format!("group id out of range: {id}"))
    }
}

impl From<Group> for u8 {
    fn from(group: Group) -> u8 {
        group.0
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed remediation-text table, indexed by group id minus one.
const METHOD_TEXTS: [&str; Group::COUNT as usize] = [
    // 1
    "Confident problem group\n\
     Try more advanced problems\n\
     Explain the solution to someone else\n\
     Solve it again from a different angle",
    // 2
    "Needs a second look\n\
     Re-read the answer and solve the problem again\n\
     Work through similar problems until it sticks",
    // 3
    "Correct the calculation-mistake tendency\n\
     Analyze the mistake pattern and note what to watch for\n\
     Practice working through calculations carefully",
    // 4
    "One-off mistake\n\
     Solve the same problem again to confirm\n\
     Move on to the next problem",
    // 5
    "Re-memorize the basics\n\
     Drill the basic facts with flashcards or notes\n\
     Review them again every day",
    // 6
    "Reinforce applied knowledge\n\
     Review the relevant textbook and reference sections\n\
     Work applied problems to deepen understanding",
    // 7
    "Strengthen application skills\n\
     Solve several similar problems\n\
     Catalogue the solution patterns and apply them to other problems",
    // 8
    "Restart from the basics\n\
     Redo fundamental problems to firm up understanding\n\
     Read the explanations and confirm the basics",
    // 9
    "Build up terminology\n\
     Check term meanings in a glossary or dictionary\n\
     Keep a summary notebook and review it regularly",
    // 10
    "Improve reading comprehension\n\
     Practice reading-comprehension and summarizing exercises\n\
     Set aside regular time for reading",
    // 11
    "Deepen fundamental understanding\n\
     Re-read the textbook and reference materials\n\
     Ask a teacher or friend to walk through it",
];

/// A fully validated answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Correct(Hesitation),
    Incorrect(FailureCause),
}

/// Cause branch of an incorrect answer, with its follow-up selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    Calculation(MistakePattern),
    Knowledge(KnowledgeDepth),
    NoApproach(MethodExperience),
    Comprehension(ComprehensionIssue),
}

impl Assessment {
    /// Validate a raw report into a problem number and an assessment.
    ///
    /// Each absent selection fails with a [`EngineError::MissingInput`] naming
    /// the field, so the caller can tell "no cause selected" apart from "no
    /// correctness selected".
    pub fn from_report(report: &ProblemReport) -> Result<(u32, Assessment), EngineError> {
        let problem_number = report.problem_number.ok_or(EngineError::MissingInput {
            field: "problem_number",
        })?;
        if problem_number == 0 {
            return Err(EngineError::InvalidInput(
                "problem number must be positive".into(),
            ));
        }

        let correctness = report.correctness.ok_or(EngineError::MissingInput {
            field: "correctness",
        })?;

        let assessment = match correctness {
            Correctness::Correct => {
                let hesitation = report.hesitation.ok_or(EngineError::MissingInput {
                    field: "hesitation",
                })?;
                Assessment::Correct(hesitation)
            }
            Correctness::Incorrect => {
                let cause = report
                    .cause
                    .ok_or(EngineError::MissingInput { field: "cause" })?;
                let failure = match cause {
                    Cause::Calculation => FailureCause::Calculation(
                        report
                            .mistake
                            .ok_or(EngineError::MissingInput { field: "mistake" })?,
                    ),
                    Cause::Knowledge => FailureCause::Knowledge(
                        report
                            .knowledge
                            .ok_or(EngineError::MissingInput { field: "knowledge" })?,
                    ),
                    Cause::NoApproach => FailureCause::NoApproach(
                        report
                            .experience
                            .ok_or(EngineError::MissingInput { field: "experience" })?,
                    ),
                    Cause::Comprehension => FailureCause::Comprehension(
                        report
                            .issue
                            .ok_or(EngineError::MissingInput { field: "issue" })?,
                    ),
                };
                Assessment::Incorrect(failure)
            }
        };

        Ok((problem_number, assessment))
    }

    /// The remediation group for this assessment. Total over all variants.
    pub fn group(self) -> Group {
        let id = match self {
            Assessment::Correct(Hesitation::Smooth) => 1,
            Assessment::Correct(Hesitation::Stalled) => 2,
            Assessment::Incorrect(FailureCause::Calculation(MistakePattern::Repeated)) => 3,
            Assessment::Incorrect(FailureCause::Calculation(MistakePattern::FirstTime)) => 4,
            Assessment::Incorrect(FailureCause::Knowledge(KnowledgeDepth::BasicRecall)) => 5,
            Assessment::Incorrect(FailureCause::Knowledge(KnowledgeDepth::Applied)) => 6,
            Assessment::Incorrect(FailureCause::NoApproach(MethodExperience::SimilarSeen)) => 7,
            Assessment::Incorrect(FailureCause::NoApproach(MethodExperience::Unseen)) => 8,
            Assessment::Incorrect(FailureCause::Comprehension(ComprehensionIssue::TermMeaning)) => {
                9
            }
            Assessment::Incorrect(FailureCause::Comprehension(
                ComprehensionIssue::LanguageTooHard,
            )) => 10,
            Assessment::Incorrect(FailureCause::Comprehension(
                ComprehensionIssue::AnswerUnclear,
            )) => 11,
        };
        Group(id)
    }
}

/// Category of change between two classifications of the same problem,
/// based on membership in the mastered set (groups 1 and 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    /// Mastered before and mastered now.
    SustainedMastery,
    /// Mastered before, not mastered now.
    Regression,
    /// Not mastered before, mastered now.
    Improvement,
    /// Not mastered either time.
    Encouragement,
}

impl Transition {
    /// Classify the change from `old` to `new`.
    pub fn between(old: Group, new: Group) -> Transition {
        match (old.is_mastered(), new.is_mastered()) {
            (true, true) => Transition::SustainedMastery,
            (true, false) => Transition::Regression,
            (false, true) => Transition::Improvement,
            (false, false) => Transition::Encouragement,
        }
    }

    /// The canonical comparison note for this category.
    pub fn message(self) -> &'static str {
        match self {
            Transition::SustainedMastery => "continuing good study habits",
            Transition::Regression => "previously mastered, needs review again",
            Transition::Improvement => "great progress, keep going",
            Transition::Encouragement => "close to full score, effort is paying off",
        }
    }
}
