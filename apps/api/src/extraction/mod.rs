// Text Extractor
// Turns an uploaded document into plain text. Best-effort per page; only an
// unparseable document is an error.

pub mod pdf;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

pub use pdf::PdfTextExtractor;

/// Plain text pulled out of a document, plus page bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Page texts in document order, each followed by a line break.
    pub text: String,
    pub page_count: usize,
    /// Pages that contributed any text.
    pub pages_with_text: usize,
}

/// Document-to-text backend. Carried in `AppState` as `Arc<dyn TextExtractor>`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, AnalysisError>;

    /// Reads the source to completion and releases it before parsing.
    fn extract_from_reader(&self, reader: &mut dyn Read) -> Result<ExtractedText, AnalysisError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.extract(&bytes)
    }

    /// Opens `path`, reads it, closes the handle, then extracts.
    fn extract_from_path(&self, path: &Path) -> Result<ExtractedText, AnalysisError> {
        let bytes = {
            let mut file = File::open(path)?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            bytes
        };
        self.extract(&bytes)
    }
}
