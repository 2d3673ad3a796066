//! Text document model for editor tabs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// An open text document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// File path, None for an unsaved buffer
    pub path: Option<PathBuf>,
    /// Document content
    pub content: String,
    /// Whether the document has unsaved changes
    pub modified: bool,
}

impl Document {
    /// Create a new untitled document
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Create a document with content already loaded from a file
    pub fn with_content(path: Option<PathBuf>, content: String) -> Self {
        Self {
            path,
            content,
            modified: false,
        }
    }

    /// Save the document to its current path
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Document has no file path"))?;
        fs::write(path, &self.content)
            .with_context(|| format!("Failed to save file: {}", path.display()))?;
        self.modified = false;
        tracing::info!("Saved document: {}", path.display());
        Ok(())
    }

    /// Save the document to a new path
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.path = Some(path.to_path_buf());
        self.save()
    }

    /// Tab title: file name, or "Untitled" for pathless buffers
    pub fn title(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Word count over the whole buffer
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// 1-based line and column for a character index into the buffer
    pub fn line_col(&self, char_index: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;
        for (i, ch) in self.content.chars().enumerate() {
            if i >= char_index {
                break;
            }
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Update content and mark as modified
    pub fn set_content(&mut self, content: String) {
        if self.content != content {
            self.content = content;
            self.modified = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        let doc = Document::with_content(Some(PathBuf::from("/notes/chapter3.md")), String::new());
        assert_eq!(doc.title(), "chapter3.md");
        assert_eq!(Document::untitled().title(), "Untitled");
    }

    #[test]
    fn test_set_content_marks_modified() {
        let mut doc = Document::untitled();
        doc.set_content("hello".to_string());
        assert!(doc.modified);

        doc.modified = false;
        doc.set_content("hello".to_string());
        assert!(!doc.modified, "identical content must not dirty the buffer");
    }

    #[test]
    fn test_line_col() {
        let doc = Document::with_content(None, "ab\ncd\nef".to_string());
        assert_eq!(doc.line_col(0), (1, 1));
        assert_eq!(doc.line_col(1), (1, 2));
        assert_eq!(doc.line_col(3), (2, 1));
        assert_eq!(doc.line_col(7), (3, 2));
    }

    #[test]
    fn test_word_count() {
        let doc = Document::with_content(None, "one  two\nthree\t four".to_string());
        assert_eq!(doc.word_count(), 4);
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let mut doc = Document::with_content(Some(path.clone()), "study notes".to_string());
        doc.modified = true;

        doc.save().unwrap();
        assert!(!doc.modified);
        assert_eq!(fs::read_to_string(&path).unwrap(), "study notes");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::untitled();
        assert!(doc.save().is_err());
    }
}
