//! Export serialization.
//!
//! Renders a generated batch into the single text blob the "download all"
//! feature ships: one `=== name ===` header line per document, the content,
//! then a blank line. `parse` is the inverse, used by programmatic consumers
//! and the round-trip tests.

use crate::models::document::ResolvedDocument;

/// Download filename offered to the collaborator.
pub const EXPORT_FILENAME: &str = "emails.txt";

/// Serializes the batch in order. Each document contributes
/// `=== {name} ===\n{content}\n\n`.
pub fn render(documents: &[ResolvedDocument]) -> String {
    let mut blob = String::new();
    for document in documents {
        blob.push_str(&format!("=== {} ===\n{}\n\n", document.name, document.content));
    }
    blob
}

/// Recovers `(name, content)` pairs from an exported blob, in order.
///
/// Exact inverse of `render` as long as no content line looks like a
/// section header and no content ends with a blank line.
pub fn parse(blob: &str) -> Vec<(String, String)> {
    let mut sections: Vec<(String, String)> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in blob.split('\n') {
        let header = line
            .strip_prefix("=== ")
            .and_then(|rest| rest.strip_suffix(" ==="));
        match header {
            Some(name) => {
                if let Some((done_name, lines)) = current.take() {
                    sections.push((done_name, join_content(lines)));
                }
                current = Some((name.to_string(), Vec::new()));
            }
            None => {
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }
    if let Some((done_name, lines)) = current.take() {
        sections.push((done_name, join_content(lines)));
    }
    sections
}

/// Joins section lines back into content, dropping the trailing separator
/// blank line(s) that `render` appends.
fn join_content(mut lines: Vec<&str>) -> String {
    while matches!(lines.last(), Some(last) if last.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_documents(contents: &[&str]) -> Vec<ResolvedDocument> {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| ResolvedDocument {
                id: i,
                name: format!("Email {}", i + 1),
                content: content.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_render_format_is_exact() {
        let documents = make_documents(&["Hi Ann", "Hi Bob"]);
        assert_eq!(
            render(&documents),
            "=== Email 1 ===\nHi Ann\n\n=== Email 2 ===\nHi Bob\n\n"
        );
    }

    #[test]
    fn test_render_empty_batch_is_empty_blob() {
        assert_eq!(render(&[]), "");
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_round_trip_recovers_pairs_in_order() {
        let documents = make_documents(&["Hi Ann, welcome to Acme", "Hi Bob, welcome to [Company]"]);
        let recovered = parse(&render(&documents));

        assert_eq!(recovered.len(), documents.len());
        for (document, (name, content)) in documents.iter().zip(&recovered) {
            assert_eq!(name, &document.name);
            assert_eq!(content, &document.content);
        }
    }

    #[test]
    fn test_round_trip_multiline_content() {
        let documents = make_documents(&["Dear Ann,\n\nWelcome aboard.\nBest,\nTeam"]);
        let recovered = parse(&render(&documents));

        assert_eq!(recovered, vec![("Email 1".to_string(), documents[0].content.clone())]);
    }

    #[test]
    fn test_parse_ignores_leading_junk_before_first_header() {
        let blob = "noise\n=== Email 1 ===\nHi\n\n";
        assert_eq!(parse(blob), vec![("Email 1".to_string(), "Hi".to_string())]);
    }
}
