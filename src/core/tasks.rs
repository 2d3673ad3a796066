//! Scheduler task list with JSON persistence

use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Done,
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// A single to-do item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
}

impl Task {
    pub fn new(title: String, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            status: TaskStatus::Pending,
            priority,
        }
    }
}

/// The scheduler's task list
#[derive(Debug, Default)]
pub struct TaskStore {
    pub tasks: Vec<Task>,
}

impl TaskStore {
    /// Path of the persisted task list
    fn store_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "studymate", "StudyMate")
            .map(|dirs| dirs.data_dir().join("tasks.json"))
    }

    /// Load the task list from the app data directory
    pub fn load() -> Self {
        let Some(path) = Self::store_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Failed to load tasks: {e}");
                Self::default()
            }
        }
    }

    /// Load from an explicit path; missing file means an empty list
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        Ok(Self { tasks })
    }

    /// Persist the task list to the app data directory
    pub fn save(&self) -> Result<()> {
        let path = Self::store_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        self.save_to(&path)
    }

    /// Persist to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.tasks)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved {} tasks to {}", self.tasks.len(), path.display());
        Ok(())
    }

    /// Append a new pending task; blank titles are rejected
    pub fn add(&mut self, title: &str, priority: Priority) -> Option<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.tasks.push(Task::new(title.to_string(), priority));
        self.tasks.last()
    }

    /// Flip a task between pending and done
    pub fn toggle(&mut self, id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.status = match task.status {
                TaskStatus::Pending => TaskStatus::Done,
                TaskStatus::Done => TaskStatus::Pending,
            };
        }
    }

    /// Remove every task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Whether any task is still pending
    pub fn has_pending(&self) -> bool {
        self.tasks.iter().any(|t| t.status == TaskStatus::Pending)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rejects_blank_titles() {
        let mut store = TaskStore::default();
        assert!(store.add("   ", Priority::Medium).is_none());
        assert!(store.add("Review Chapter 3", Priority::Medium).is_some());
        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_toggle() {
        let mut store = TaskStore::default();
        let id = store.add("Flashcards", Priority::High).unwrap().id;

        store.toggle(id);
        assert_eq!(store.tasks[0].status, TaskStatus::Done);
        assert!(!store.has_pending());

        store.toggle(id);
        assert_eq!(store.tasks[0].status, TaskStatus::Pending);
        assert!(store.has_pending());
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let mut store = TaskStore::default();
        store.add("Review Chapter 3", Priority::Medium);
        store.add("Practice problems", Priority::Low);
        store.save_to(&path).unwrap();

        let loaded = TaskStore::load_from(&path).unwrap();
        assert_eq!(loaded.tasks.len(), 2);
        assert_eq!(loaded.tasks[0].title, "Review Chapter 3");
        assert_eq!(loaded.tasks[0].id, store.tasks[0].id);
        assert_eq!(loaded.tasks[1].priority, Priority::Low);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let task = Task::new("t".to_string(), Priority::High);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"pending\""));
        assert!(json.contains("\"high\""));
    }
}
