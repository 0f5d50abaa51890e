use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named substitution point. Occurrences of `[name]` in the template are
/// replaced per output row; `name` is matched verbatim, with no normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: Uuid,
    pub name: String,
    /// Display-only color tag. Never consulted during substitution.
    pub color: String,
    /// Ordered candidate values. The position of a value is its row index.
    pub values: Vec<PlaceholderValue>,
}

/// One candidate substitution for a placeholder, at a fixed list position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderValue {
    pub id: Uuid,
    pub text: String,
}
