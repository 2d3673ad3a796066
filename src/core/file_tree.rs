//! Explorer tree over a root directory

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

/// Directory levels shown below the explorer root
const MAX_DEPTH: usize = 10;

/// A file or directory in the explorer tree
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub children: Vec<FileNode>,
    pub expanded: bool,
}

impl FileNode {
    fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            name,
            path,
            is_dir,
            children: Vec::new(),
            expanded: false,
        }
    }

    /// Whether this file opens in a StudyMate tab
    pub fn is_document(&self) -> bool {
        !self.is_dir
            && matches!(
                self.path
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .as_deref(),
                Some("txt" | "md" | "markdown" | "py" | "pdf" | "docx" | "odt")
            )
    }
}

/// Explorer tree rooted at a chosen directory
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    pub root: Option<FileNode>,
    pub root_path: Option<PathBuf>,
}

impl FileTree {
    /// Build the tree for a directory
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut root = FileNode::new(path.to_path_buf(), true);
        root.expanded = true;

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(MAX_DEPTH)
            .sort_by(|a, b| {
                match (a.file_type().is_dir(), b.file_type().is_dir()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => a
                        .file_name()
                        .to_ascii_lowercase()
                        .cmp(&b.file_name().to_ascii_lowercase()),
                }
            })
            .into_iter()
            .filter_entry(|e| !Self::is_excluded(e.file_name()));

        // Entries arrive in pre-order; keep the chain of open directories
        // on a stack and attach finished ones to their parent.
        let mut stack: Vec<(usize, FileNode)> = vec![(0, root)];
        for entry in walker {
            let entry = entry?;
            let depth = entry.depth();
            let is_dir = entry.file_type().is_dir();

            while stack.len() > 1 && stack.last().map(|(d, _)| *d >= depth).unwrap_or(false) {
                if let Some((_, node)) = stack.pop() {
                    if let Some((_, parent)) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            }

            let node = FileNode::new(entry.into_path(), is_dir);
            if is_dir {
                stack.push((depth, node));
            } else if let Some((_, parent)) = stack.last_mut() {
                parent.children.push(node);
            }
        }
        while stack.len() > 1 {
            if let Some((_, node)) = stack.pop() {
                if let Some((_, parent)) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
        }

        Ok(Self {
            root: stack.pop().map(|(_, node)| node),
            root_path: Some(path.to_path_buf()),
        })
    }

    fn is_excluded(name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        name.starts_with('.') || name == "node_modules" || name == "target"
    }

    /// Rebuild the tree from disk
    pub fn refresh(&mut self) -> Result<()> {
        if let Some(root_path) = self.root_path.clone() {
            *self = Self::from_path(&root_path)?;
        }
        Ok(())
    }

    /// Toggle expansion state of a directory
    pub fn toggle_expanded(&mut self, path: &Path) {
        if let Some(ref mut root) = self.root {
            Self::toggle_in_node(root, path);
        }
    }

    fn toggle_in_node(node: &mut FileNode, path: &Path) {
        if node.path == path {
            node.expanded = !node.expanded;
            return;
        }
        for child in &mut node.children {
            Self::toggle_in_node(child, path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn build_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zeta")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::write(dir.path().join("Beta.txt"), "").unwrap();
        fs::write(dir.path().join("alpha/deep.pdf"), "").unwrap();
        fs::write(dir.path().join(".hidden/secret.txt"), "").unwrap();
        dir
    }

    #[test]
    fn test_tree_structure_and_order() {
        let dir = build_fixture();
        let tree = FileTree::from_path(dir.path()).unwrap();
        let root = tree.root.unwrap();

        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        // Directories first, then files, case-insensitive alphabetical;
        // hidden entries skipped entirely.
        assert_eq!(names, vec!["alpha", "zeta", "Beta.txt", "notes.md"]);

        let alpha = &root.children[0];
        assert!(alpha.is_dir);
        assert_eq!(alpha.children.len(), 1);
        assert_eq!(alpha.children[0].name, "deep.pdf");
        assert!(alpha.children[0].is_document());
    }

    #[test]
    fn test_toggle_expanded() {
        let dir = build_fixture();
        let mut tree = FileTree::from_path(dir.path()).unwrap();
        let alpha_path = dir.path().join("alpha");

        tree.toggle_expanded(&alpha_path);
        let root = tree.root.as_ref().unwrap();
        assert!(root.children[0].expanded);
    }

    #[test]
    fn test_is_document() {
        let mut node = FileNode::new(PathBuf::from("a.docx"), false);
        assert!(node.is_document());
        node = FileNode::new(PathBuf::from("a.exe"), false);
        assert!(!node.is_document());
    }
}
