//! Mastery-rate statistics over result collections.

use serde::{Deserialize, Serialize};

use crate::model::ResultRecord;

/// Aggregate mastery rates for one result collection, in percent.
///
/// No rounding is applied here; presentation layers round for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    /// Share of results in the mastered set (groups 1 and 2).
    pub score_rate: f64,
    /// Share of results in group 1 alone.
    pub perfection_rate: f64,
}

/// Compute score and perfection rates over a result collection.
///
/// Both rates are 0 for an empty collection.
pub fn calculate_rates(results: &[ResultRecord]) -> Rates {
    if results.is_empty() {
        return Rates {
            score_rate: 0.0,
            perfection_rate: 0.0,
        };
    }

    let total = results.len() as f64;
    let mastered = results.iter().filter(|r| r.group.is_mastered()).count() as f64;
    let perfect = results.iter().filter(|r| r.group.is_perfect()).count() as f64;

    Rates {
        score_rate: 100.0 * mastered / total,
        perfection_rate: 100.0 * perfect / total,
    }
}

/// Per-subject status row for the summary view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSummary {
    /// Subject name.
    pub subject: String,
    /// Number of live results.
    pub count: usize,
    /// Mastery rates over the subject's own result set.
    pub rates: Rates,
}

/// Summarize one subject's result set.
pub fn summarize(subject: &str, results: &[ResultRecord]) -> SubjectSummary {
    SubjectSummary {
        subject: subject.to_string(),
        count: results.len(),
        rates: calculate_rates(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Group;

    fn record(problem_number: u32, group: u8) -> ResultRecord {
        let group = Group::new(group).unwrap();
        ResultRecord {
            problem_number,
            group,
            method_text: group.method_text().to_string(),
            comment: String::new(),
            subject: "math".into(),
        }
    }

    #[test]
    fn rates_for_empty_set_are_zero() {
        let rates = calculate_rates(&[]);
        assert_eq!(rates.score_rate, 0.0);
        assert_eq!(rates.perfection_rate, 0.0);
    }

    #[test]
    fn rates_are_unrounded() {
        let results = vec![record(1, 1), record(2, 2), record(3, 3)];
        let rates = calculate_rates(&results);
        assert!((rates.score_rate - 200.0 / 3.0).abs() < 1e-9);
        assert!((rates.perfection_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn rates_all_mastered() {
        let results = vec![record(1, 1), record(2, 1)];
        let rates = calculate_rates(&results);
        assert_eq!(rates.score_rate, 100.0);
        assert_eq!(rates.perfection_rate, 100.0);
    }

    #[test]
    fn rates_none_mastered() {
        let results = vec![record(1, 5), record(2, 9), record(3, 11)];
        let rates = calculate_rates(&results);
        assert_eq!(rates.score_rate, 0.0);
        assert_eq!(rates.perfection_rate, 0.0);
    }

    #[test]
    fn summarize_carries_count_and_rates() {
        let results = vec![record(1, 1), record(2, 4)];
        let summary = summarize("physics", &results);
        assert_eq!(summary.subject, "physics");
        assert_eq!(summary.count, 2);
        assert_eq!(summary.rates.score_rate, 50.0);
        assert_eq!(summary.rates.perfection_rate, 50.0);
    }
}
