//! PDF text extraction.
//!
//! Primary path walks pages with `lopdf` so page order and empty pages are
//! explicit. When a document loads but no page yields text, `pdf-extract` gets
//! one whole-document attempt before settling on an empty string.
//!
//! Both parsers can panic on malformed input, so every call into them runs
//! under `catch_unwind`.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, warn};

use crate::errors::AnalysisError;
use crate::extraction::{ExtractedText, TextExtractor};

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, AnalysisError> {
        let doc = load_document(bytes)?;
        let pages = guarded(|| doc.get_pages())
            .ok_or_else(|| AnalysisError::DocumentUnreadable("page tree is malformed".into()))?;
        let page_count = pages.len();

        let mut text = String::new();
        let mut pages_with_text = 0;

        for page_number in pages.keys().copied() {
            let page_text = match guarded(|| doc.extract_text(&[page_number])) {
                Some(Ok(page_text)) => page_text,
                Some(Err(e)) => {
                    warn!("Skipping page {page_number}: text extraction failed: {e}");
                    continue;
                }
                None => {
                    warn!("Skipping page {page_number}: text extraction panicked");
                    continue;
                }
            };

            let page_text = page_text.trim_end_matches(['\r', '\n']);
            if page_text.trim().is_empty() {
                debug!("Page {page_number} has no extractable text");
                continue;
            }

            text.push_str(page_text);
            text.push('\n');
            pages_with_text += 1;
        }

        if pages_with_text == 0 && page_count > 0 {
            text = fallback_extract(bytes);
        }

        debug!(
            page_count,
            pages_with_text,
            chars = text.len(),
            "Extracted PDF text"
        );

        Ok(ExtractedText {
            text,
            page_count,
            pages_with_text,
        })
    }
}

/// Runs `f`, turning a panic into `None`.
fn guarded<T>(f: impl FnOnce() -> T) -> Option<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).ok()
}

/// Parses the document, decrypting with the empty user password when needed.
fn load_document(bytes: &[u8]) -> Result<Document, AnalysisError> {
    let mut doc = guarded(|| Document::load_mem(bytes))
        .ok_or_else(|| AnalysisError::DocumentUnreadable("PDF parser panicked".into()))?
        .map_err(|e| AnalysisError::DocumentUnreadable(format!("not a valid PDF: {e}")))?;

    if doc.is_encrypted() {
        guarded(|| doc.decrypt(""))
            .ok_or_else(|| {
                AnalysisError::DocumentUnreadable("PDF decryption panicked".into())
            })?
            .map_err(|e| {
                AnalysisError::DocumentUnreadable(format!(
                    "encrypted PDF could not be opened: {e}"
                ))
            })?;
    }

    Ok(doc)
}

/// Whole-document extraction via `pdf-extract`. Never fails: errors and panics
/// inside the parser are logged and yield an empty string.
fn fallback_extract(bytes: &[u8]) -> String {
    match guarded(|| pdf_extract::extract_text_from_mem(bytes)) {
        Some(Ok(text)) if !text.trim().is_empty() => {
            debug!(chars = text.len(), "Recovered text with pdf-extract fallback");
            let mut text = text.trim().to_string();
            text.push('\n');
            text
        }
        Some(Ok(_)) => {
            debug!("pdf-extract fallback found no text either");
            String::new()
        }
        Some(Err(e)) => {
            warn!("pdf-extract fallback failed: {e}");
            String::new()
        }
        None => {
            warn!("pdf-extract fallback panicked");
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::io::Write;

    /// Builds a PDF with one page per entry; `None` is a page with no text.
    pub(crate) fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => media_box,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_single_page_text_is_extracted() {
        let bytes = build_pdf(&[Some("Rust developer")]);
        let extracted = PdfTextExtractor.extract(&bytes).unwrap();

        assert!(extracted.text.contains("Rust developer"));
        assert!(extracted.text.ends_with('\n'));
        assert_eq!(extracted.page_count, 1);
        assert_eq!(extracted.pages_with_text, 1);
    }

    #[test]
    fn test_pages_are_concatenated_in_order() {
        let bytes = build_pdf(&[Some("Alpha page"), Some("Bravo page"), Some("Charlie page")]);
        let extracted = PdfTextExtractor.extract(&bytes).unwrap();

        let alpha = extracted.text.find("Alpha page").unwrap();
        let bravo = extracted.text.find("Bravo page").unwrap();
        let charlie = extracted.text.find("Charlie page").unwrap();
        assert!(alpha < bravo && bravo < charlie);
        assert_eq!(extracted.page_count, 3);
        assert_eq!(extracted.pages_with_text, 3);

        let lines: Vec<&str> = extracted
            .text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(lines, vec!["Alpha page", "Bravo page", "Charlie page"]);
    }

    #[test]
    fn test_blank_pages_contribute_nothing() {
        let bytes = build_pdf(&[Some("Kafka"), None, Some("Postgres")]);
        let extracted = PdfTextExtractor.extract(&bytes).unwrap();

        assert_eq!(extracted.page_count, 3);
        assert_eq!(extracted.pages_with_text, 2);
        let lines: Vec<&str> = extracted
            .text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(lines, vec!["Kafka", "Postgres"]);
    }

    #[test]
    fn test_document_without_text_yields_empty_string() {
        let bytes = build_pdf(&[None, None]);
        let extracted = PdfTextExtractor.extract(&bytes).unwrap();

        assert!(extracted.text.trim().is_empty());
        assert_eq!(extracted.page_count, 2);
        assert_eq!(extracted.pages_with_text, 0);
    }

    #[test]
    fn test_non_pdf_bytes_are_unreadable() {
        let err = PdfTextExtractor
            .extract(b"Python developer with SQL skills")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DocumentUnreadable(_)));
    }

    #[test]
    fn test_empty_bytes_are_unreadable() {
        let err = PdfTextExtractor.extract(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::DocumentUnreadable(_)));
    }

    #[test]
    fn test_corrupted_bytes_never_panic() {
        let original = build_pdf(&[Some("Rust developer"), Some("Kafka")]);
        for offset in 0..original.len() {
            let mut bytes = original.clone();
            bytes[offset] ^= 0xFF;
            let result = PdfTextExtractor.extract(&bytes);
            assert!(
                matches!(result, Ok(_) | Err(AnalysisError::DocumentUnreadable(_))),
                "unexpected result after flipping byte {offset}: {result:?}"
            );
        }
    }

    #[test]
    fn test_extract_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&build_pdf(&[Some("Terraform")])).unwrap();

        let extracted = PdfTextExtractor.extract_from_path(file.path()).unwrap();
        assert!(extracted.text.contains("Terraform"));
    }

    #[test]
    fn test_extract_from_path_corrupt_file_is_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG\r\n\x1a\nnot really a pdf").unwrap();

        let err = PdfTextExtractor.extract_from_path(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::DocumentUnreadable(_)));
    }

    #[test]
    fn test_extract_from_missing_path_is_io_error() {
        let err = PdfTextExtractor
            .extract_from_path(std::path::Path::new("/nonexistent/resume.pdf"))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));
    }

    #[test]
    fn test_extract_from_reader() {
        let bytes = build_pdf(&[Some("Kubernetes")]);
        let mut reader = std::io::Cursor::new(bytes);

        let extracted = PdfTextExtractor.extract_from_reader(&mut reader).unwrap();
        assert!(extracted.text.contains("Kubernetes"));
    }
}
