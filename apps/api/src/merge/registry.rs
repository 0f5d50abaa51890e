//! Placeholder Registry.
//!
//! Holds the set of named fields and, per field, its ordered value list.
//! All mutation operations are synchronous and total: a missing id is
//! reported through the return value, never an error. The HTTP layer turns
//! a `false`/`None` into 404 because the collaborator addressed a specific
//! resource; programmatic callers may ignore it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::placeholder::{Placeholder, PlaceholderValue};

/// Color tags handed out to new placeholders, cycling in creation order.
/// Purely visual; the merge engine never reads them.
const COLOR_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

/// An ordered collection of placeholders owned by one editing session.
///
/// Placeholder order is creation order. It does not affect output except
/// under the documented duplicate-name and marker-in-value edge cases
/// (see `engine`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    placeholders: Vec<Placeholder>,
    /// Total placeholders ever created, used to cycle the color palette.
    /// Not decremented on removal so colors stay stable.
    #[serde(default)]
    created: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Creates a placeholder with an empty name, no values, a fresh id, and
    /// the next palette color, and returns a copy of it.
    pub fn add_placeholder(&mut self) -> Placeholder {
        let placeholder = Placeholder {
            id: Uuid::new_v4(),
            name: String::new(),
            color: COLOR_PALETTE[self.created % COLOR_PALETTE.len()].to_string(),
            values: Vec::new(),
        };
        self.created += 1;
        self.placeholders.push(placeholder.clone());
        placeholder
    }

    /// Sets the placeholder's name verbatim. No validation: empty and
    /// duplicate names are allowed (see `engine` for the duplicate policy).
    /// Returns false if the id is absent.
    pub fn rename_placeholder(&mut self, id: Uuid, new_name: &str) -> bool {
        match self.placeholders.iter_mut().find(|p| p.id == id) {
            Some(placeholder) => {
                placeholder.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes the placeholder. Returns false if the id is absent.
    pub fn remove_placeholder(&mut self, id: Uuid) -> bool {
        let before = self.placeholders.len();
        self.placeholders.retain(|p| p.id != id);
        self.placeholders.len() < before
    }

    /// Appends a value with empty text to the placeholder's list and returns
    /// a copy of it, or `None` if the placeholder is absent.
    pub fn add_value(&mut self, placeholder_id: Uuid) -> Option<PlaceholderValue> {
        let placeholder = self.placeholders.iter_mut().find(|p| p.id == placeholder_id)?;
        let value = PlaceholderValue {
            id: Uuid::new_v4(),
            text: String::new(),
        };
        placeholder.values.push(value.clone());
        Some(value)
    }

    /// Sets a value's text. Returns false if either id is absent.
    pub fn update_value(&mut self, placeholder_id: Uuid, value_id: Uuid, text: &str) -> bool {
        let Some(placeholder) = self.placeholders.iter_mut().find(|p| p.id == placeholder_id)
        else {
            return false;
        };
        match placeholder.values.iter_mut().find(|v| v.id == value_id) {
            Some(value) => {
                value.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a value from its placeholder's list. Later values shift down
    /// one position; no gap is preserved. Returns false if either id is
    /// absent.
    pub fn remove_value(&mut self, placeholder_id: Uuid, value_id: Uuid) -> bool {
        let Some(placeholder) = self.placeholders.iter_mut().find(|p| p.id == placeholder_id)
        else {
            return false;
        };
        let before = placeholder.values.len();
        placeholder.values.retain(|v| v.id != value_id);
        placeholder.values.len() < before
    }
}
