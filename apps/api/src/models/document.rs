use serde::{Deserialize, Serialize};

/// One fully-substituted output document for a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDocument {
    /// Row index this document was produced for, starting at 0.
    pub id: usize,
    /// Display name, `"Email {id + 1}"`.
    pub name: String,
    pub content: String,
}
