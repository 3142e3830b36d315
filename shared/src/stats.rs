//! Percentages derived from the backend's aggregate counts.

use strum::IntoEnumIterator;

use crate::model::{Grade, StatsSummary, Verdict};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelAccuracy {
    pub hosted: f64,
    pub custom: f64,
}

impl StatsSummary {
    pub fn verdict_count(&self, verdict: Verdict) -> u64 {
        self.verdict_distribution
            .get(verdict.as_ref())
            .copied()
            .unwrap_or(0)
    }

    /// Share of reviewed tasks each model got right. A "both correct"
    /// verdict counts for both models. Zero while nothing is reviewed.
    pub fn accuracy(&self) -> ModelAccuracy {
        let credited = |credits: fn(&Verdict) -> bool| {
            Verdict::iter()
                .filter(|v| credits(v))
                .map(|v| self.verdict_count(v))
                .sum::<u64>()
        };
        ModelAccuracy {
            hosted: percent_of(credited(Verdict::credits_hosted), self.reviewed),
            custom: percent_of(credited(Verdict::credits_custom), self.reviewed),
        }
    }

    pub fn verdict_share(&self, verdict: Verdict) -> f64 {
        percent_of(self.verdict_count(verdict), self.reviewed)
    }

    pub fn hosted_grades(&self) -> Vec<(Grade, u64)> {
        grade_rows(|g| self.gemini_grade_distribution.get(g).copied())
    }

    pub fn custom_grades(&self) -> Vec<(Grade, u64)> {
        grade_rows(|g| self.custom_grade_distribution.get(g).copied())
    }
}

fn grade_rows(lookup: impl Fn(&str) -> Option<u64>) -> Vec<(Grade, u64)> {
    Grade::iter()
        .map(|grade| (grade, lookup(grade.as_ref()).unwrap_or(0)))
        .collect()
}

pub fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
