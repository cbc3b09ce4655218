use serde::{Deserialize, Serialize};

/// Placeholder title for tasks created without one.
pub const DEFAULT_TITLE: &str = "New task...";

/// The durable unit of the task list.
///
/// An empty `id` means the record has not been persisted yet; the store
/// assigns one on create and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub order: i64,
    pub done: bool,
}

impl Record {
    /// Builds an unsaved record. The id is left empty for the store to fill.
    pub fn new(title: impl Into<String>, order: i64) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            order,
            done: false,
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// A record that only carries an id, used to address reads and deletes.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            order: 0,
            done: false,
        }
    }
}

/// Attributes accepted by `Collection::add`. Missing values are defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub title: Option<String>,
    pub order: Option<i64>,
    pub done: Option<bool>,
}

impl NewRecord {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Done/remaining counts for a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub done: usize,
    pub remaining: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_no_id_and_is_open() {
        let record = Record::new("Buy milk", 1);
        assert!(!record.has_id());
        assert!(!record.done);
        assert_eq!(record.order, 1);
    }

    #[test]
    fn serializes_with_exact_field_names() {
        let record = Record {
            id: "abc".into(),
            title: "T".into(),
            order: 3,
            done: true,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "abc", "title": "T", "order": 3, "done": true})
        );
    }
}
