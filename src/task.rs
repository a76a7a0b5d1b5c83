//! Task data structure.
//!
//! This module defines the `Task` record that represents a single to-do item
//! with its completion flag, optional memo and optional attached image.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task. Generated once at creation and never reused.
pub type TaskId = Uuid;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// `data:` URI of the attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Task {
    /// Create an open task with a freshly generated id.
    ///
    /// Callers are expected to have rejected blank text already.
    pub fn new(text: &str) -> Self {
        Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
            memo: None,
            image_url: None,
        }
    }

    /// Memo text, or the empty string when none is set.
    pub fn memo_text(&self) -> &str {
        self.memo.as_deref().unwrap_or("")
    }

    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// True when `text` contains something other than whitespace.
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults() {
        let task = Task::new("buy milk");
        assert!(!task.id.is_nil());
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.memo, None);
        assert_eq!(task.memo_text(), "");
        assert!(!task.has_image());
    }

    #[test]
    fn serialization_omits_absent_annotations() {
        let mut task = Task::new("water plants");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["text"], "water plants");
        assert_eq!(json["completed"], false);
        assert!(json.get("memo").is_none());
        assert!(json.get("image_url").is_none());

        task.memo = Some("twice a week".to_string());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["memo"], "twice a week");

        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn has_content_rejects_whitespace() {
        assert!(has_content("a"));
        assert!(has_content("  a  "));
        assert!(!has_content(""));
        assert!(!has_content(" \t\n "));
    }
}
