//! Merge Engine.
//!
//! Computes how many documents a (template, registry) pair will produce and
//! produces them. Pure synchronous computation; the only failure modes are
//! the two generate preconditions (empty template, zero row count).
//!
//! Substitution policies:
//! - Batch size is the max value-count over placeholders that have at least
//!   one value. Placeholders with zero values are padded per row, never
//!   treated as a zero that blocks the whole batch.
//! - A value at the row index substitutes verbatim, empty string included.
//!   Out-of-range rows substitute the bracketed fallback `[name]`, or
//!   `[Field]` when the name is empty.
//! - Placeholder names are matched literally: the name is regex-escaped
//!   before the `[name]` pattern is built.
//! - Duplicate names: the first-registered placeholder's global replace
//!   consumes every marker, so later duplicates find nothing.
//! - Known edge case, kept as documented behavior: substitution runs one
//!   pass per placeholder over the working text, so a value containing
//!   another placeholder's `[marker]` is rewritten when that placeholder's
//!   pass runs later in registry order.

use anyhow::anyhow;
use regex::{NoExpand, Regex};
use tracing::info;

use crate::errors::AppError;
use crate::merge::registry::Registry;
use crate::models::document::ResolvedDocument;
use crate::models::placeholder::Placeholder;

/// Fallback label used when an unnamed placeholder has no value for a row.
const UNNAMED_FALLBACK: &str = "Field";

/// Returns the number of documents `generate` would produce: the maximum
/// value-count among placeholders with at least one value, or 0 when there
/// is no such placeholder.
pub fn preview_count(registry: &Registry) -> usize {
    registry
        .placeholders()
        .iter()
        .map(|p| p.values.len())
        .filter(|len| *len > 0)
        .max()
        .unwrap_or(0)
}

/// Produces one resolved document per row, index-ordered from 0.
///
/// Fails with `AppError::Validation` when the template is empty or the
/// row count is zero. Recomputes from scratch on every call.
pub fn generate(template: &str, registry: &Registry) -> Result<Vec<ResolvedDocument>, AppError> {
    if template.is_empty() {
        return Err(AppError::Validation(
            "Template is empty. Write the email before generating.".to_string(),
        ));
    }

    let rows = preview_count(registry);
    if rows == 0 {
        return Err(AppError::Validation(
            "No placeholder has any values. Add values to at least one field.".to_string(),
        ));
    }

    let markers: Vec<(Regex, &Placeholder)> = registry
        .placeholders()
        .iter()
        .map(|p| marker_pattern(&p.name).map(|re| (re, p)))
        .collect::<Result<_, _>>()?;

    let mut documents = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut content = template.to_string();
        for (marker, placeholder) in &markers {
            let replacement = match placeholder.values.get(row) {
                Some(value) => value.text.clone(),
                None => fallback_label(&placeholder.name),
            };
            content = marker
                .replace_all(&content, NoExpand(&replacement))
                .into_owned();
        }
        documents.push(ResolvedDocument {
            id: row,
            name: format!("Email {}", row + 1),
            content,
        });
    }

    info!("Generated {} documents from {} placeholders", rows, markers.len());
    Ok(documents)
}

/// Builds the pattern matching the literal marker `[name]`. The name is
/// escaped, so regex-special characters in it have no pattern meaning.
fn marker_pattern(name: &str) -> Result<Regex, AppError> {
    Regex::new(&format!(r"\[{}\]", regex::escape(name)))
        .map_err(|e| AppError::Internal(anyhow!("invalid marker pattern for '{name}': {e}")))
}

/// Bracketed display form substituted when a placeholder has no value for
/// the row: the marker itself, or `[Field]` for an unnamed placeholder.
fn fallback_label(name: &str) -> String {
    if name.is_empty() {
        format!("[{UNNAMED_FALLBACK}]")
    } else {
        format!("[{name}]")
    }
}
