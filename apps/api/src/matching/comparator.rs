//! Set-based comparison of a résumé against a job description.
//!
//! Matching is relative to the job description: `matched` and `missing` are
//! always subsets of the job keywords, so the comparison is not symmetric.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::keywords::{KeywordExtractor, KeywordSet};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of one comparison. Built only by `KeywordComparator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Percentage of job keywords found in the résumé, 0.0 – 100.0, two decimals.
    score: f64,
    matched: KeywordSet,
    missing: KeywordSet,
    job_keyword_count: usize,
    resume_keyword_count: usize,
}

impl ComparisonResult {
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn matched(&self) -> &KeywordSet {
        &self.matched
    }

    pub fn missing(&self) -> &KeywordSet {
        &self.missing
    }

    pub fn job_keyword_count(&self) -> usize {
        self.job_keyword_count
    }

    pub fn resume_keyword_count(&self) -> usize {
        self.resume_keyword_count
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Comparator
// ────────────────────────────────────────────────────────────────────────────

/// Pure keyword comparator. Holds no mutable state and can be shared freely.
#[derive(Debug, Clone)]
pub struct KeywordComparator {
    extractor: KeywordExtractor,
}

impl KeywordComparator {
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    pub fn english() -> Self {
        Self::new(KeywordExtractor::english())
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    pub fn compare(&self, resume_text: &str, job_text: &str) -> ComparisonResult {
        let resume = self.extractor.keywords(resume_text);
        let job = self.extractor.keywords(job_text);
        self.compare_sets(&resume, &job)
    }

    /// Algorithm:
    /// 1. matched = resume ∩ job
    /// 2. missing = job − resume
    /// 3. score = 100 × |matched| / |job|, rounded to two decimals
    ///
    /// An empty job set scores 0.0 with both `matched` and `missing` empty.
    pub fn compare_sets(&self, resume: &KeywordSet, job: &KeywordSet) -> ComparisonResult {
        if job.is_empty() {
            debug!("Job description has no keywords; scoring 0");
            return ComparisonResult {
                score: 0.0,
                matched: KeywordSet::new(),
                missing: KeywordSet::new(),
                job_keyword_count: 0,
                resume_keyword_count: resume.len(),
            };
        }

        let matched = resume.intersection(job);
        let missing = job.difference(resume);
        let score = round_to_hundredths(100.0 * matched.len() as f64 / job.len() as f64);

        debug!(
            matched = matched.len(),
            missing = missing.len(),
            score,
            "Compared keyword sets"
        );

        ComparisonResult {
            score,
            matched,
            missing,
            job_keyword_count: job.len(),
            resume_keyword_count: resume.len(),
        }
    }
}

impl Default for KeywordComparator {
    fn default() -> Self {
        Self::english()
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
