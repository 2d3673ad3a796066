//! Per-extension file readers and office-document conversion
//!
//! Plain-text formats are read as-is; `.docx` and `.odt` get their paragraph
//! text extracted from the archive XML. ODT files can also be converted to
//! PDF through a headless office suite for the rendered view.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::Command;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors from reading or converting documents
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("invalid document XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("office converter not found (is LibreOffice installed?)")]
    ConverterMissing,
    #[error("office conversion failed: {0}")]
    ConverterFailed(String),
}

/// How a file should be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Opens in a text editor tab
    Text,
    /// Opens in the rendered PDF viewer
    Pdf,
}

/// Classify a path by extension
pub fn classify(path: &Path) -> FileKind {
    match extension(path).as_deref() {
        Some("pdf") => FileKind::Pdf,
        _ => FileKind::Text,
    }
}

/// Read any text-kind file into a string, dispatching on extension.
///
/// Unknown extensions are read as plain text, matching the editor's
/// open-anything behavior.
pub fn read_to_text(path: &Path) -> Result<String, FormatError> {
    match extension(path).as_deref() {
        Some("docx") => read_docx(path),
        Some("odt") => read_odt(path),
        _ => read_plain(path),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

fn read_plain(path: &Path) -> Result<String, FormatError> {
    std::fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract paragraph text from a Word document, one line per paragraph
fn read_docx(path: &Path) -> Result<String, FormatError> {
    extract_archive_paragraphs(path, "word/document.xml", b"w:p", b"w:t")
}

/// Extract paragraph text from an OpenDocument text file
fn read_odt(path: &Path) -> Result<String, FormatError> {
    // ODT marks headings and body paragraphs with different tags; both
    // carry their text directly (possibly inside spans).
    extract_odt_paragraphs(path)
}

/// Shared walk over a zipped XML document: paragraphs are delimited by
/// `para_tag`, and only text inside `text_tag` elements counts as content.
fn extract_archive_paragraphs(
    path: &Path,
    entry: &str,
    para_tag: &[u8],
    text_tag: &[u8],
) -> Result<String, FormatError> {
    let file = File::open(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;
    let xml = archive.by_name(entry)?;
    let mut reader = Reader::from_reader(BufReader::new(xml));

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == text_tag => in_text = true,
            Event::End(e) if e.name().as_ref() == text_tag => in_text = false,
            Event::End(e) if e.name().as_ref() == para_tag => {
                paragraphs.push(std::mem::take(&mut current));
            }
            Event::Text(t) if in_text => {
                let text = t.unescape().map_err(|e| FormatError::Xml(e.into()))?;
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

fn extract_odt_paragraphs(path: &Path) -> Result<String, FormatError> {
    let file = File::open(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;
    let xml = archive.by_name("content.xml")?;
    let mut reader = Reader::from_reader(BufReader::new(xml));

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    // Paragraphs can nest (tables, frames); only close out at depth zero.
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e)
                if e.name().as_ref() == b"text:p" || e.name().as_ref() == b"text:h" =>
            {
                depth += 1;
            }
            Event::End(e) if e.name().as_ref() == b"text:p" || e.name().as_ref() == b"text:h" => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    paragraphs.push(std::mem::take(&mut current));
                }
            }
            Event::Text(t) if depth > 0 => {
                let text = t.unescape().map_err(|e| FormatError::Xml(e.into()))?;
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

/// Convert an ODT file to PDF via the office suite's headless CLI.
///
/// Returns the path of the converted PDF inside `out_dir`. The caller owns
/// `out_dir` and its cleanup.
pub fn convert_odt_to_pdf(path: &Path, out_dir: &Path) -> Result<PathBuf, FormatError> {
    let output = Command::new("soffice")
        .arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(out_dir)
        .arg(path)
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FormatError::ConverterMissing,
            _ => FormatError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FormatError::ConverterFailed(format!(
            "exit {:?}: {}",
            output.status.code(),
            stderr.trim()
        )));
    }

    let converted = out_dir
        .join(path.file_stem().unwrap_or_default())
        .with_extension("pdf");
    if !converted.exists() {
        return Err(FormatError::ConverterFailed(
            "converter reported success but produced no output".to_string(),
        ));
    }

    tracing::info!("Converted {} to {}", path.display(), converted.display());
    Ok(converted)
}
