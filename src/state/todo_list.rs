//! In-memory to-do list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors shown to the user when editing the list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Please enter a task.")]
    EmptyText,
    #[error("Task {0} not found.")]
    NotFound(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TodoList {
    items: Vec<TodoItem>,
    next_id: u64,
}

impl TodoList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a task; surrounding whitespace is trimmed and blank text is rejected
    pub fn add(&mut self, text: &str) -> Result<TodoItem, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }

        let item = TodoItem {
            id: self.next_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.items.push(item.clone());
        info!("Added task {}: {}", item.id, item.text);
        Ok(item)
    }

    pub fn remove(&mut self, id: u64) -> Result<TodoItem, TodoError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TodoError::NotFound(id))?;
        let item = self.items.remove(index);
        info!("Removed task {}", id);
        Ok(item)
    }

    /// Tasks in insertion order
    pub fn list(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_assigns_increasing_ids() {
        let mut list = TodoList::new();
        let first = list.add("  buy beans ").unwrap();
        let second = list.add("grind beans").unwrap();

        assert_eq!(first.text, "buy beans");
        assert!(second.id > first.id);
        let texts: Vec<_> = list.list().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["buy beans", "grind beans"]);
    }

    #[test]
    fn blank_text_is_rejected_with_message() {
        let mut list = TodoList::new();
        let err = list.add("   ").unwrap_err();
        assert_eq!(err, TodoError::EmptyText);
        assert_eq!(err.to_string(), "Please enter a task.");
        assert!(list.is_empty());
    }

    #[test]
    fn remove_deletes_only_the_matching_item() {
        let mut list = TodoList::new();
        let keep = list.add("keep").unwrap();
        let drop = list.add("drop").unwrap();

        assert_eq!(list.remove(drop.id).unwrap().text, "drop");
        assert_eq!(list.len(), 1);
        assert_eq!(list.list()[0].id, keep.id);
        assert_eq!(list.remove(drop.id), Err(TodoError::NotFound(drop.id)));
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut list = TodoList::new();
        let a = list.add("a").unwrap();
        list.remove(a.id).unwrap();
        let b = list.add("b").unwrap();
        assert_ne!(a.id, b.id);
    }
}
