//! Analysis service: validates inputs, extracts résumé text and compares keywords.
//!
//! Stateless: everything a comparison needs arrives in the request. The
//! extractor and comparator are injected and shared read-only across requests.

pub mod handlers;

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AnalysisError;
use crate::extraction::{ExtractedText, TextExtractor};
use crate::matching::{ComparisonResult, KeywordComparator};

/// One analysis request: the uploaded résumé and the pasted job description.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub resume: Option<Bytes>,
    pub job_description: Option<String>,
}

#[derive(Clone)]
pub struct ResumeAnalyzer {
    extractor: Arc<dyn TextExtractor>,
    comparator: Arc<KeywordComparator>,
}

impl ResumeAnalyzer {
    pub fn new(extractor: Arc<dyn TextExtractor>, comparator: Arc<KeywordComparator>) -> Self {
        Self {
            extractor,
            comparator,
        }
    }

    /// Full pipeline: check inputs → extract résumé text → compare keywords.
    ///
    /// Both inputs are checked before the document is touched, so a missing
    /// job description never costs a PDF parse.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<ComparisonResult, AnalysisError> {
        let resume = require_resume(request.resume.as_ref())?;
        let job_description = require_text(request.job_description.as_deref(), "job_desc")?;

        let extracted = self.extractor.extract(resume)?;
        info!(
            pages = extracted.page_count,
            pages_with_text = extracted.pages_with_text,
            "Resume text extracted"
        );

        let result = self.comparator.compare(&extracted.text, job_description);
        info!(
            score = result.score(),
            matched = result.matched().len(),
            missing = result.missing().len(),
            "Resume analyzed"
        );
        Ok(result)
    }

    /// Compares two texts directly, skipping document extraction.
    pub fn compare_texts(
        &self,
        resume_text: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<ComparisonResult, AnalysisError> {
        let resume_text = require_text(resume_text, "resume_text")?;
        let job_description = require_text(job_description, "job_desc")?;

        let result = self.comparator.compare(resume_text, job_description);
        debug!(score = result.score(), "Texts compared");
        Ok(result)
    }

    pub fn extract(&self, resume: Option<&Bytes>) -> Result<ExtractedText, AnalysisError> {
        let resume = require_resume(resume)?;
        self.extractor.extract(resume)
    }
}

fn require_resume(resume: Option<&Bytes>) -> Result<&[u8], AnalysisError> {
    match resume {
        Some(bytes) if !bytes.is_empty() => Ok(bytes.as_ref()),
        _ => Err(AnalysisError::MissingInput("resume")),
    }
}

fn require_text<'a>(text: Option<&'a str>, field: &'static str) -> Result<&'a str, AnalysisError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AnalysisError::MissingInput(field)),
    }
}
