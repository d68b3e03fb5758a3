//! Document text extraction for uploaded resumes.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("text document is not valid UTF-8")]
    InvalidEncoding,

    #[error("document contains no extractable text")]
    EmptyDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

/// A resume file as received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Detects the format from magic bytes, then content type, then extension.
    pub fn format(&self) -> Result<DocumentFormat, ExtractionError> {
        if self.bytes.starts_with(b"%PDF-") {
            return Ok(DocumentFormat::Pdf);
        }

        let content_type = self
            .content_type
            .as_deref()
            .unwrap_or("")
            .to_ascii_lowercase();
        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.contains("application/pdf") || extension == "pdf" {
            Ok(DocumentFormat::Pdf)
        } else if content_type.starts_with("text/plain") || extension == "txt" {
            Ok(DocumentFormat::PlainText)
        } else {
            Err(ExtractionError::UnsupportedFormat(
                self.file_name
                    .clone()
                    .unwrap_or_else(|| "unnamed upload".to_string()),
            ))
        }
    }
}

/// Extracts the full text of a document. One attempt, no partial fallback.
pub async fn extract_text(document: &UploadedDocument) -> Result<String, ExtractionError> {
    let text = match document.format()? {
        DocumentFormat::Pdf => extract_pdf(document.bytes.clone()).await?,
        DocumentFormat::PlainText => String::from_utf8(document.bytes.to_vec())
            .map_err(|_| ExtractionError::InvalidEncoding)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }
    Ok(text)
}

/// Runs the PDF parser on the blocking pool; a parser panic is reported as
/// an extraction error.
async fn extract_pdf(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    })
    .await
    .map_err(|e| ExtractionError::Pdf(format!("parser aborted: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: Option<&str>, content_type: Option<&str>, bytes: &'static [u8]) -> UploadedDocument {
        UploadedDocument::new(
            name.map(String::from),
            content_type.map(String::from),
            Bytes::from_static(bytes),
        )
    }

    #[test]
    fn test_format_from_magic_bytes_wins() {
        let d = doc(Some("resume.txt"), Some("text/plain"), b"%PDF-1.7\n...");
        assert_eq!(d.format().unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_format_from_content_type_and_extension() {
        assert_eq!(
            doc(None, Some("application/pdf"), b"x").format().unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            doc(Some("CV.PDF"), None, b"x").format().unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            doc(Some("cv.txt"), None, b"x").format().unwrap(),
            DocumentFormat::PlainText
        );
        assert_eq!(
            doc(None, Some("text/plain; charset=utf-8"), b"x")
                .format()
                .unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = doc(Some("resume.docx"), None, b"PK\x03\x04").format().unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(name) if name == "resume.docx"));
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let d = doc(Some("cv.txt"), None, b"Python and Docker");
        assert_eq!(extract_text(&d).await.unwrap(), "Python and Docker");
    }

    #[tokio::test]
    async fn test_blank_document_is_empty() {
        let d = doc(Some("cv.txt"), None, b"  \n\t ");
        assert!(matches!(
            extract_text(&d).await.unwrap_err(),
            ExtractionError::EmptyDocument
        ));
    }

    #[tokio::test]
    async fn test_invalid_utf8_rejected() {
        let d = doc(Some("cv.txt"), None, b"\xff\xfe\xfd");
        assert!(matches!(
            extract_text(&d).await.unwrap_err(),
            ExtractionError::InvalidEncoding
        ));
    }

    #[tokio::test]
    async fn test_pdf_extraction() {
        let d = doc(
            Some("resume.pdf"),
            Some("application/pdf"),
            include_bytes!("testdata/resume.pdf"),
        );
        assert_eq!(d.format().unwrap(), DocumentFormat::Pdf);

        let text = extract_text(&d).await.unwrap();
        for word in ["Python", "SQL", "Docker"] {
            assert!(text.contains(word), "{word} missing from {text:?}");
        }
    }

    #[tokio::test]
    async fn test_corrupt_pdf_fails() {
        let d = doc(Some("cv.pdf"), Some("application/pdf"), b"not really a pdf");
        assert!(matches!(
            extract_text(&d).await.unwrap_err(),
            ExtractionError::Pdf(_)
        ));
    }
}
