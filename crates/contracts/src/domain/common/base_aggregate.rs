use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Base aggregate with the fields every aggregate carries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Stable record identifier
    pub id: Id,
    /// Business-facing record code (e.g. "PIL-2026-001")
    pub code: String,
    /// Description / display name of the record
    pub description: String,
    /// Free-form comment
    pub comment: Option<String>,
    /// Lifecycle metadata
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// Create a new aggregate
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Create an aggregate with existing metadata (when loading from storage)
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
        }
    }

    /// Refresh the update timestamp
    pub fn touch(&mut self) {
        self.metadata.touch();
    }

    /// Set the comment
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}
