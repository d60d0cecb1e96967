//! The classification engine.
//!
//! Owns the per-subject result sets, applies the decision tree to submitted
//! reports, reconciles resubmitted problem numbers, and produces the tabular
//! export/import views. One engine instance belongs to one learner session;
//! instances are independent and never shared.

use crate::classify::{Assessment, Group, Transition};
use crate::error::EngineError;
use crate::model::{ProblemReport, ResultRecord, Subject};
use crate::statistics::{calculate_rates, summarize, Rates, SubjectSummary};
use crate::tabular::{row_to_record, TabularData};

/// Title of the cross-subject table produced by [`ClassificationEngine::export_all`].
pub const COMBINED_TABLE_TITLE: &str = "all_subjects";

/// What a single classification produced.
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// The classified problem.
    pub problem_number: u32,
    /// The remediation group it landed in.
    pub group: Group,
    /// Canonical remediation text for that group.
    pub method_text: String,
    /// Rates over the subject's entire updated result set.
    pub rates: Rates,
    /// Present only when an earlier result for the same problem was replaced.
    pub transition: Option<Transition>,
}

impl ClassificationOutcome {
    /// Human-readable analysis text for the UI layer.
    ///
    /// Rates are rounded to one decimal here and nowhere else.
    pub fn render(&self) -> String {
        let mut text = format!(
            "Problem {} falls into group {}.\n\nRecommended study method:\n{}",
            self.problem_number, self.group, self.method_text
        );
        text.push_str(&format!(
            "\n\nScore rate: {:.1}%\nPerfection rate: {:.1}%",
            self.rates.score_rate, self.rates.perfection_rate
        ));
        if let Some(transition) = self.transition {
            text.push_str(&format!(
                "\n\nRepeat problem analysis:\n{}",
                transition.message()
            ));
        }
        text
    }
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows successfully imported across all tables.
    pub rows_imported: usize,
    /// Subjects that received rows, in touch order.
    pub subjects_touched: Vec<String>,
}

/// The classification engine. See the crate docs for the data model.
///
/// The subject list is the single owner of all result sets; the current
/// subject is tracked by name only, so there is no second collection to fall
/// out of sync.
#[derive(Debug, Default)]
pub struct ClassificationEngine {
    subjects: Vec<Subject>,
    current_subject: Option<String>,
}

impl ClassificationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an engine from persisted parts.
    pub fn from_parts(current_subject: Option<String>, subjects: Vec<Subject>) -> Self {
        Self {
            subjects,
            current_subject,
        }
    }

    /// The currently selected subject, if any.
    pub fn current_subject(&self) -> Option<&str> {
        self.current_subject.as_deref()
    }

    /// All subjects in creation order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    fn subject_index(&self, name: &str) -> Option<usize> {
        self.subjects.iter().position(|s| s.name == name)
    }

    /// Select `name` as the current subject, creating it on first use.
    ///
    /// Idempotent for a known subject; never discards results.
    pub fn set_subject(&mut self, name: &str) -> Result<(), EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "subject name must not be empty".into(),
            ));
        }
        if self.subject_index(name).is_none() {
            self.subjects.push(Subject::new(name));
        }
        self.current_subject = Some(name.to_string());
        Ok(())
    }

    /// Empty a subject's result set, keeping the subject itself.
    pub fn clear_subject(&mut self, name: &str) -> Result<(), EngineError> {
        let idx = self
            .subject_index(name)
            .ok_or_else(|| EngineError::MissingSubject(name.to_string()))?;
        self.subjects[idx].results.clear();
        Ok(())
    }

    /// Classify a submitted report into `subject`'s result set.
    ///
    /// Validation happens before any mutation, so a failed call leaves the
    /// engine untouched. A resubmitted problem number replaces the earlier
    /// record and the returned outcome carries the comparison transition; the
    /// caller-supplied comment is used only when there was nothing to compare
    /// against.
    pub fn classify(
        &mut self,
        subject: &str,
        report: &ProblemReport,
    ) -> Result<ClassificationOutcome, EngineError> {
        if subject.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "subject name must not be empty".into(),
            ));
        }
        let (problem_number, assessment) = Assessment::from_report(report)?;
        let idx = self
            .subject_index(subject)
            .ok_or_else(|| EngineError::MissingSubject(subject.to_string()))?;

        let group = assessment.group();
        let entry = &mut self.subjects[idx];

        let transition = match entry
            .results
            .iter()
            .position(|r| r.problem_number == problem_number)
        {
            Some(pos) => {
                let old = entry.results.remove(pos);
                Some(Transition::between(old.group, group))
            }
            None => None,
        };

        let comment = match transition {
            Some(t) => t.message().to_string(),
            None => report.comment.clone(),
        };

        entry.results.push(ResultRecord {
            problem_number,
            group,
            method_text: group.method_text().to_string(),
            comment,
            subject: entry.name.clone(),
        });

        Ok(ClassificationOutcome {
            problem_number,
            group,
            method_text: group.method_text().to_string(),
            rates: calculate_rates(&entry.results),
            transition,
        })
    }

    /// Export one subject's results, sorted ascending by group.
    ///
    /// The sort is stable, so records in the same group keep their insertion
    /// order. Fails with `NoData` when the subject is absent or empty.
    pub fn export_subject(&self, name: &str) -> Result<TabularData, EngineError> {
        let idx = self.subject_index(name).ok_or(EngineError::NoData)?;
        let entry = &self.subjects[idx];
        if entry.results.is_empty() {
            return Err(EngineError::NoData);
        }

        let mut records: Vec<&ResultRecord> = entry.results.iter().collect();
        records.sort_by_key(|r| r.group);

        let mut table = TabularData::for_export(&entry.name);
        for record in records {
            table.push_record(record);
        }
        Ok(table)
    }

    /// Export every non-empty subject, plus a combined table when at least
    /// two subjects have results.
    ///
    /// The combined table is sorted by subject name, then group, stable.
    pub fn export_all(&self) -> Result<Vec<TabularData>, EngineError> {
        let mut tables: Vec<TabularData> = self
            .subjects
            .iter()
            .filter(|s| !s.results.is_empty())
            .map(|s| self.export_subject(&s.name))
            .collect::<Result<_, _>>()?;

        if tables.is_empty() {
            return Err(EngineError::NoData);
        }

        if tables.len() >= 2 {
            let mut records: Vec<&ResultRecord> = self
                .subjects
                .iter()
                .flat_map(|s| s.results.iter())
                .collect();
            records.sort_by(|a, b| (&a.subject, a.group).cmp(&(&b.subject, b.group)));

            let mut combined = TabularData::for_export(COMBINED_TABLE_TITLE);
            for record in records {
                combined.push_record(record);
            }
            tables.push(combined);
        }

        Ok(tables)
    }

    /// Import tables of previously exported rows, best-effort.
    ///
    /// Tables missing a required column and rows that fail to parse are
    /// skipped with a warning; the call fails only when nothing at all was
    /// imported. Rows are appended as-is — import never reconciles duplicate
    /// problem numbers, so re-importing an export alongside live results is
    /// additive.
    pub fn import_tabular(
        &mut self,
        tables: &[TabularData],
    ) -> Result<ImportSummary, EngineError> {
        let mut rows_imported = 0usize;
        let mut subjects_touched: Vec<String> = Vec::new();

        for table in tables {
            if !table.has_required_columns() {
                tracing::warn!(
                    "skipping table {:?}: missing required columns",
                    table.title
                );
                continue;
            }

            for row in &table.rows {
                let Some(record) = row_to_record(table, row, self.current_subject.as_deref())
                else {
                    continue;
                };

                let idx = match self.subject_index(&record.subject) {
                    Some(idx) => idx,
                    None => {
                        self.subjects.push(Subject::new(&record.subject));
                        self.subjects.len() - 1
                    }
                };
                if !subjects_touched.contains(&record.subject) {
                    subjects_touched.push(record.subject.clone());
                }
                self.subjects[idx].results.push(record);
                rows_imported += 1;
            }
        }

        if rows_imported == 0 {
            return Err(EngineError::NoData);
        }

        Ok(ImportSummary {
            rows_imported,
            subjects_touched,
        })
    }

    /// Summary rows for every non-empty subject, in creation order.
    pub fn subject_summary(&self) -> Vec<SubjectSummary> {
        self.subjects
            .iter()
            .filter(|s| !s.results.is_empty())
            .map(|s| summarize(&s.name, &s.results))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cause, Correctness, Hesitation, KnowledgeDepth, MistakePattern};
    use crate::tabular::{COL_GROUP, COL_METHOD_TEXT, COL_PROBLEM_NUMBER, EXPORT_COLUMNS};

    fn correct_report(problem_number: u32, hesitation: Hesitation) -> ProblemReport {
        ProblemReport {
            problem_number: Some(problem_number),
            correctness: Some(Correctness::Correct),
            hesitation: Some(hesitation),
            ..Default::default()
        }
    }

    fn incorrect_calc_report(problem_number: u32, mistake: MistakePattern) -> ProblemReport {
        ProblemReport {
            problem_number: Some(problem_number),
            correctness: Some(Correctness::Incorrect),
            cause: Some(Cause::Calculation),
            mistake: Some(mistake),
            ..Default::default()
        }
    }

    fn engine_with(subject: &str) -> ClassificationEngine {
        let mut engine = ClassificationEngine::new();
        engine.set_subject(subject).unwrap();
        engine
    }

    #[test]
    fn set_subject_rejects_empty_names() {
        let mut engine = ClassificationEngine::new();
        assert!(matches!(
            engine.set_subject("").unwrap_err(),
            EngineError::InvalidInput(_)
        ));
        assert!(matches!(
            engine.set_subject("   ").unwrap_err(),
            EngineError::InvalidInput(_)
        ));
        assert!(engine.current_subject().is_none());
    }

    #[test]
    fn set_subject_is_idempotent() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();

        engine.set_subject("math").unwrap();
        assert_eq!(engine.subjects()[0].results.len(), 1);
        assert_eq!(engine.subjects().len(), 1);
    }

    #[test]
    fn set_subject_switches_without_data_loss() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();

        engine.set_subject("english").unwrap();
        assert_eq!(engine.current_subject(), Some("english"));
        assert_eq!(engine.subjects()[0].results.len(), 1);
    }

    #[test]
    fn classify_requires_known_subject() {
        let mut engine = ClassificationEngine::new();
        let err = engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingSubject(s) if s == "math"));
    }

    #[test]
    fn classify_appends_and_reports_rates() {
        let mut engine = engine_with("math");

        let outcome = engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();
        assert_eq!(outcome.group.id(), 1);
        assert_eq!(outcome.rates.score_rate, 100.0);

        let outcome = engine
            .classify("math", &incorrect_calc_report(2, MistakePattern::Repeated))
            .unwrap();
        assert_eq!(outcome.group.id(), 3);
        assert_eq!(outcome.rates.score_rate, 50.0);
        assert_eq!(outcome.rates.perfection_rate, 50.0);
        assert!(outcome.transition.is_none());
    }

    #[test]
    fn classify_keeps_caller_comment_for_new_problems() {
        let mut engine = engine_with("math");
        let mut report = correct_report(1, Hesitation::Stalled);
        report.comment = "took two tries".into();

        engine.classify("math", &report).unwrap();
        assert_eq!(engine.subjects()[0].results[0].comment, "took two tries");
    }

    #[test]
    fn resubmission_replaces_and_repositions() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();
        engine
            .classify("math", &correct_report(2, Hesitation::Stalled))
            .unwrap();

        let outcome = engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();

        let results = &engine.subjects()[0].results;
        assert_eq!(results.len(), 2);
        // The resubmitted problem moved to the end.
        assert_eq!(results[0].problem_number, 2);
        assert_eq!(results[1].problem_number, 1);
        assert_eq!(outcome.group.id(), 1);
        assert_eq!(
            outcome.transition,
            Some(Transition::SustainedMastery)
        );
    }

    #[test]
    fn resubmission_comment_comes_from_transition() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &incorrect_calc_report(7, MistakePattern::FirstTime))
            .unwrap();

        let mut second = correct_report(7, Hesitation::Smooth);
        second.comment = "ignored for repeats".into();
        let outcome = engine.classify("math", &second).unwrap();

        assert_eq!(outcome.transition, Some(Transition::Improvement));
        assert_eq!(
            engine.subjects()[0].results[0].comment,
            Transition::Improvement.message()
        );
    }

    #[test]
    fn regression_and_encouragement_notes() {
        let mut engine = engine_with("math");

        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();
        let outcome = engine
            .classify("math", &incorrect_calc_report(1, MistakePattern::Repeated))
            .unwrap();
        assert_eq!(outcome.transition, Some(Transition::Regression));

        engine
            .classify("math", &incorrect_calc_report(2, MistakePattern::FirstTime))
            .unwrap();
        let outcome = engine
            .classify("math", &incorrect_calc_report(2, MistakePattern::Repeated))
            .unwrap();
        assert_eq!(outcome.transition, Some(Transition::Encouragement));
    }

    #[test]
    fn failed_classify_leaves_state_unchanged() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();

        let incomplete = ProblemReport {
            problem_number: Some(1),
            correctness: Some(Correctness::Incorrect),
            cause: Some(Cause::Comprehension),
            ..Default::default()
        };
        assert!(engine.classify("math", &incomplete).is_err());

        let results = &engine.subjects()[0].results;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].group.id(), 1);
    }

    #[test]
    fn clear_subject_empties_but_keeps_subject() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();

        engine.clear_subject("math").unwrap();
        assert_eq!(engine.subjects().len(), 1);
        assert!(engine.subjects()[0].results.is_empty());

        assert!(matches!(
            engine.clear_subject("latin").unwrap_err(),
            EngineError::MissingSubject(_)
        ));
    }

    #[test]
    fn export_subject_sorts_by_group_stably() {
        let mut engine = engine_with("math");
        // groups: problem 10 -> 5, 20 -> 1, 30 -> 3, 40 -> 1
        let reports = [
            ProblemReport {
                problem_number: Some(10),
                correctness: Some(Correctness::Incorrect),
                cause: Some(Cause::Knowledge),
                knowledge: Some(KnowledgeDepth::BasicRecall),
                ..Default::default()
            },
            correct_report(20, Hesitation::Smooth),
            incorrect_calc_report(30, MistakePattern::Repeated),
            correct_report(40, Hesitation::Smooth),
        ];
        for report in &reports {
            engine.classify("math", report).unwrap();
        }

        let table = engine.export_subject("math").unwrap();
        assert_eq!(table.columns, EXPORT_COLUMNS.to_vec());
        let problem_order: Vec<&str> =
            table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(problem_order, vec!["20", "40", "30", "10"]);
        let group_order: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(group_order, vec!["1", "1", "3", "5"]);
    }

    #[test]
    fn export_subject_no_data() {
        let engine = engine_with("math");
        assert!(matches!(
            engine.export_subject("math").unwrap_err(),
            EngineError::NoData
        ));
        assert!(matches!(
            engine.export_subject("latin").unwrap_err(),
            EngineError::NoData
        ));
    }

    #[test]
    fn export_all_single_subject_has_no_combined_table() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();

        let tables = engine.export_all().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, "math");
    }

    #[test]
    fn export_all_combines_multiple_subjects() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &incorrect_calc_report(1, MistakePattern::Repeated))
            .unwrap();
        engine.set_subject("english").unwrap();
        engine
            .classify("english", &correct_report(5, Hesitation::Smooth))
            .unwrap();

        let tables = engine.export_all().unwrap();
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].title, "math");
        assert_eq!(tables[1].title, "english");
        assert_eq!(tables[2].title, COMBINED_TABLE_TITLE);

        // Combined table is sorted by subject name, then group.
        let subjects: Vec<&str> = tables[2].rows.iter().map(|r| r[4].as_str()).collect();
        assert_eq!(subjects, vec!["english", "math"]);
    }

    #[test]
    fn export_all_empty_engine_is_no_data() {
        let engine = engine_with("math");
        assert!(matches!(engine.export_all().unwrap_err(), EngineError::NoData));
    }

    #[test]
    fn import_is_additive_and_routes_by_subject() {
        let mut source = engine_with("math");
        source
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();
        let exported = source.export_subject("math").unwrap();

        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Stalled))
            .unwrap();

        let summary = engine.import_tabular(&[exported]).unwrap();
        assert_eq!(summary.rows_imported, 1);
        assert_eq!(summary.subjects_touched, vec!["math".to_string()]);

        // No reconciliation: both problem-1 rows are live now.
        assert_eq!(engine.subjects()[0].results.len(), 2);
    }

    #[test]
    fn import_creates_unseen_subjects() {
        let mut source = engine_with("physics");
        source
            .classify("physics", &correct_report(3, Hesitation::Smooth))
            .unwrap();
        let exported = source.export_subject("physics").unwrap();

        let mut engine = ClassificationEngine::new();
        let summary = engine.import_tabular(&[exported]).unwrap();
        assert_eq!(summary.rows_imported, 1);
        assert_eq!(engine.subjects()[0].name, "physics");
    }

    #[test]
    fn import_skips_bad_table_but_keeps_good_one() {
        let bad = TabularData {
            title: "bad".into(),
            columns: vec![COL_PROBLEM_NUMBER.into(), COL_METHOD_TEXT.into()],
            rows: vec![vec!["1".into(), "text".into()]],
        };
        let good = TabularData {
            title: "good".into(),
            columns: vec![
                COL_PROBLEM_NUMBER.into(),
                COL_GROUP.into(),
                COL_METHOD_TEXT.into(),
            ],
            rows: vec![
                vec!["1".into(), "2".into(), "text".into()],
                vec!["oops".into(), "2".into(), "text".into()],
            ],
        };

        let mut engine = engine_with("math");
        let summary = engine.import_tabular(&[bad, good]).unwrap();
        // Subject-less rows land in the current subject.
        assert_eq!(summary.rows_imported, 1);
        assert_eq!(summary.subjects_touched, vec!["math".to_string()]);
        assert_eq!(engine.subjects()[0].results[0].group.id(), 2);
    }

    #[test]
    fn import_of_nothing_usable_fails() {
        let bad = TabularData {
            title: "bad".into(),
            columns: vec![COL_PROBLEM_NUMBER.into()],
            rows: vec![vec!["1".into()]],
        };
        let mut engine = engine_with("math");
        assert!(matches!(
            engine.import_tabular(&[bad]).unwrap_err(),
            EngineError::NoData
        ));
        assert!(matches!(
            engine.import_tabular(&[]).unwrap_err(),
            EngineError::NoData
        ));
    }

    #[test]
    fn subject_summary_skips_empty_subjects() {
        let mut engine = engine_with("math");
        engine
            .classify("math", &correct_report(1, Hesitation::Smooth))
            .unwrap();
        engine.set_subject("english").unwrap();

        let summary = engine.subject_summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].subject, "math");
        assert_eq!(summary[0].count, 1);
        assert_eq!(summary[0].rates.perfection_rate, 100.0);
    }

    #[test]
    fn outcome_render_mentions_group_and_rates() {
        let mut engine = engine_with("math");
        let outcome = engine
            .classify("math", &correct_report(1, Hesitation::Stalled))
            .unwrap();

        let text = outcome.render();
        assert!(text.contains("Problem 1 falls into group 2."));
        assert!(text.contains("Score rate: 100.0%"));
        assert!(text.contains("Perfection rate: 0.0%"));
        assert!(!text.contains("Repeat problem analysis"));

        let outcome = engine
            .classify("math", &incorrect_calc_report(1, MistakePattern::Repeated))
            .unwrap();
        let text = outcome.render();
        assert!(text.contains("Repeat problem analysis"));
        assert!(text.contains(Transition::Regression.message()));
    }
}
