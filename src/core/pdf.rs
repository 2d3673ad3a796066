//! PDF loading, text extraction, and page rasterization
//!
//! Page count and text come from `lopdf` directly. Page images are produced
//! by shelling out to poppler's `pdftoppm`; when poppler is missing the
//! viewer falls back to extracted text.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use image::RgbaImage;

/// An open PDF document
pub struct PdfDocument {
    path: PathBuf,
    doc: lopdf::Document,
    page_count: usize,
}

impl PdfDocument {
    /// Load a PDF from disk
    pub fn open(path: &Path) -> Result<Self> {
        let doc = lopdf::Document::load(path)
            .with_context(|| format!("Failed to load PDF: {}", path.display()))?;
        let page_count = doc.get_pages().len();
        Ok(Self {
            path: path.to_path_buf(),
            doc,
            page_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Extract the text of every page, one page per line group
    pub fn extract_text(&self) -> Result<String> {
        let mut content = String::new();
        for page_num in self.doc.get_pages().keys() {
            let text = self
                .doc
                .extract_text(&[*page_num])
                .with_context(|| format!("Failed to extract text from page {page_num}"))?;
            content.push_str(&text);
            content.push('\n');
        }
        Ok(content)
    }

    /// Rasterize a single page (0-based index) at the given zoom factor
    pub fn render_page(&self, page: usize, zoom: f32) -> Result<RgbaImage> {
        let page_num = page + 1;
        let dir = tempfile::tempdir().context("Failed to create render directory")?;
        let prefix = dir.path().join("page");

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-f")
            .arg(page_num.to_string())
            .arg("-l")
            .arg(page_num.to_string())
            .arg("-r")
            .arg(dpi_for_zoom(zoom).to_string())
            .arg(&self.path)
            .arg(&prefix)
            .output()
            .context("Failed to run pdftoppm")?;

        if !output.status.success() {
            anyhow::bail!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        // pdftoppm pads the page number in the output name, so scan for
        // the single PNG it produced rather than guessing the padding.
        let rendered = std::fs::read_dir(dir.path())
            .context("Failed to read render directory")?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .find(|p| p.extension().map(|e| e == "png").unwrap_or(false))
            .ok_or_else(|| anyhow::anyhow!("pdftoppm produced no output for page {page_num}"))?;

        let img = image::open(&rendered)
            .with_context(|| format!("Failed to decode rendered page {page_num}"))?;
        Ok(img.to_rgba8())
    }
}

/// Rasterization resolution for a zoom factor, clamped to sane bounds
pub fn dpi_for_zoom(zoom: f32) -> u32 {
    (96.0 * zoom).round().clamp(24.0, 600.0) as u32
}

/// Whether poppler's page rasterizer is on the PATH
pub fn poppler_available() -> bool {
    Command::new("pdftoppm").arg("-v").output().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Object, Stream};

    fn write_minimal_pdf(path: &Path, pages: usize) {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for _ in 0..pages {
            let content = lopdf::content::Content {
                operations: Vec::new(),
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().unwrap(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0i64.into(), 0i64.into(), 612i64.into(), 792i64.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_open_and_page_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("three-pages.pdf");
        write_minimal_pdf(&path, 3);

        let pdf = PdfDocument::open(&path).unwrap();
        assert_eq!(pdf.page_count(), 3);
        assert_eq!(pdf.path(), path);
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(PdfDocument::open(Path::new("/nonexistent.pdf")).is_err());
    }

    #[test]
    fn test_dpi_for_zoom() {
        assert_eq!(dpi_for_zoom(1.0), 96);
        assert_eq!(dpi_for_zoom(2.0), 192);
        assert_eq!(dpi_for_zoom(0.1), 24);
        assert_eq!(dpi_for_zoom(50.0), 600);
    }
}
