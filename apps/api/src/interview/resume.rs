//! Resume text extraction for uploaded files, chosen by extension.

use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

/// Converts legacy `.doc` files to PDF.
const DOC_CONVERTER: &str = "libreoffice";
const DOC_CONVERSION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Error extracting text from PDF: {0}")]
    Pdf(String),

    #[error("Error extracting text from file: {0}")]
    Text(#[from] std::string::FromUtf8Error),

    #[error("Error extracting text from DOCX: {0}")]
    Docx(String),

    #[error("Error converting Word document: {0}")]
    Conversion(String),

    #[error("Unsupported resume format '{0}'")]
    Unsupported(String),
}

fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

pub async fn extract_resume_text(filename: &str, bytes: &[u8]) -> Result<String, ResumeError> {
    match extension_of(filename).as_str() {
        "pdf" => pdf_text(bytes),
        "txt" | "rtf" => Ok(String::from_utf8(bytes.to_vec())?),
        "docx" => docx_text(bytes),
        "doc" => doc_text(DOC_CONVERTER, bytes).await,
        other => Err(ResumeError::Unsupported(other.to_string())),
    }
}

/// Never fails: an extraction error becomes the resume text itself, so the
/// interviewer still sees why there is no resume. Unknown formats are ignored.
pub async fn resume_text_or_message(filename: &str, bytes: &[u8]) -> String {
    info!("Processing resume file: {filename} ({} bytes)", bytes.len());
    match extract_resume_text(filename, bytes).await {
        Ok(text) => text,
        Err(ResumeError::Unsupported(ext)) => {
            warn!("Ignoring resume '{filename}' with unsupported extension '{ext}'");
            String::new()
        }
        Err(e) => {
            warn!("Could not read resume '{filename}': {e}");
            e.to_string()
        }
    }
}

fn pdf_text(bytes: &[u8]) -> Result<String, ResumeError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ResumeError::Pdf(e.to_string()))
}

/// Body text of `word/document.xml`. Runs are joined, each paragraph ends a
/// line, and `<w:tab/>` / `<w:br/>` become a tab and a newline.
pub fn docx_text(bytes: &[u8]) -> Result<String, ResumeError> {
    read_docx(bytes).map_err(|e| ResumeError::Docx(format!("{e:#}")))
}

fn read_docx(bytes: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("not a DOCX archive")?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("missing word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text.trim().to_string())
}

/// Converts a `.doc` upload to PDF with `converter` in a scratch directory,
/// then reads the PDF. The scratch directory is removed either way.
async fn doc_text(converter: &str, bytes: &[u8]) -> Result<String, ResumeError> {
    let work_dir = std::env::temp_dir().join(format!("resume_doc_{}", uuid::Uuid::new_v4()));
    let result = convert_doc(converter, &work_dir, bytes).await;
    if let Err(e) = tokio::fs::remove_dir_all(&work_dir).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Could not remove {}: {e}", work_dir.display());
        }
    }
    result
}

async fn convert_doc(
    converter: &str,
    work_dir: &Path,
    bytes: &[u8],
) -> Result<String, ResumeError> {
    tokio::fs::create_dir_all(work_dir)
        .await
        .map_err(|e| ResumeError::Conversion(format!("creating {}: {e}", work_dir.display())))?;
    let input = work_dir.join("resume.doc");
    tokio::fs::write(&input, bytes)
        .await
        .map_err(|e| ResumeError::Conversion(format!("writing {}: {e}", input.display())))?;

    let run = Command::new(converter)
        .args(["--headless", "--norestore", "--convert-to", "pdf", "--outdir"])
        .arg(work_dir)
        .arg(&input)
        .kill_on_drop(true)
        .output();
    let output = tokio::time::timeout(DOC_CONVERSION_TIMEOUT, run)
        .await
        .map_err(|_| {
            ResumeError::Conversion(format!(
                "{converter} timed out after {DOC_CONVERSION_TIMEOUT:?}"
            ))
        })?
        .map_err(|e| ResumeError::Conversion(format!("failed to run {converter}: {e}")))?;

    if !output.status.success() {
        return Err(ResumeError::Conversion(format!(
            "{converter} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let pdf = tokio::fs::read(work_dir.join("resume.pdf"))
        .await
        .map_err(|e| ResumeError::Conversion(format!("{converter} produced no PDF: {e}")))?;
    pdf_text(&pdf)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Ada Lovelace</w:t></w:r></w:p>
    <w:p>
      <w:r><w:t xml:space="preserve">Rust &amp; </w:t></w:r>
      <w:r><w:t>systems</w:t><w:tab/><w:t>2019</w:t></w:r>
    </w:p>
  </w:body>
</w:document>"#;

    fn docx_fixture(document_xml: &str) -> Vec<u8> {
        let options = zip::write::FileOptions::default();
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(br#"<?xml version="1.0"?><Types/>"#).unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_plain_text_resume() {
        let text = extract_resume_text("cv.TXT", b"Rust engineer, 5 years").await.unwrap();
        assert_eq!(text, "Rust engineer, 5 years");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_error() {
        assert!(matches!(
            extract_resume_text("cv.txt", &[0xff, 0xfe, 0x00]).await,
            Err(ResumeError::Text(_))
        ));
    }

    #[tokio::test]
    async fn test_docx_resume_text() {
        let bytes = docx_fixture(DOCUMENT_XML);
        let text = resume_text_or_message("cv.docx", &bytes).await;
        assert_eq!(text, "Ada Lovelace\nRust & systems\t2019");
    }

    #[test]
    fn test_docx_without_document_part_is_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("notes.txt", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = docx_text(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"), "{err}");
    }

    #[tokio::test]
    async fn test_broken_docx_becomes_message() {
        let message = resume_text_or_message("cv.docx", b"PK..").await;
        assert!(message.starts_with("Error extracting text from DOCX"));
    }

    #[tokio::test]
    async fn test_doc_conversion_failure_is_reported() {
        let err = doc_text("definitely-not-a-converter", b"\xd0\xcf\x11\xe0")
            .await
            .unwrap_err();
        assert!(matches!(err, ResumeError::Conversion(_)));
        assert!(err.to_string().contains("definitely-not-a-converter"));
    }

    #[tokio::test]
    async fn test_unknown_format_is_ignored() {
        assert_eq!(resume_text_or_message("cv.png", b"\x89PNG").await, "");
    }

    #[tokio::test]
    async fn test_broken_pdf_becomes_message() {
        let message = resume_text_or_message("cv.pdf", b"definitely not a pdf").await;
        assert!(message.starts_with("Error extracting text from PDF"));
    }
}
