//! Note Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note owned by exactly one user.
///
/// The owner is set at creation and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_pinned: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted by the edit endpoint.
///
/// Only provided fields are applied. `is_pinned` is presence-checked so
/// an explicit `false` is a valid update, never silently dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
}

impl NotePatch {
    /// Treat blank strings the same as absent fields, so a patch can
    /// never blank out a title or content.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.filter(|t| !t.trim().is_empty());
        self.content = self.content.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.is_pinned.is_none()
    }
}

/// Add-note request body
#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Pin-update request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePinRequest {
    pub is_pinned: Option<bool>,
}

/// Search query string
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Single-note response
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub error: bool,
    pub note: Note,
    pub message: String,
}

/// Note-list response
#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub error: bool,
    pub notes: Vec<Note>,
    pub message: String,
}

/// Message-only response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub error: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_normalization_drops_blank_strings() {
        let patch = NotePatch {
            title: Some("  ".to_string()),
            content: Some(String::new()),
            tags: None,
            is_pinned: None,
        }
        .normalized();

        assert!(patch.title.is_none());
        assert!(patch.content.is_none());
        assert!(patch.is_empty());
    }

    #[test]
    fn test_pin_only_patch_is_not_empty() {
        let patch = NotePatch {
            is_pinned: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_tags_count_as_a_change() {
        // Clearing every tag is a legitimate edit.
        let patch = NotePatch {
            tags: Some(vec![]),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            content: "C".to_string(),
            tags: vec!["work".to_string()],
            is_pinned: false,
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("isPinned"));
        assert!(json.contains("userId"));
        assert!(json.contains("createdAt"));
    }
}
