// crates/gendoc/src/meta.rs

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static META_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z0-9_-]+):\s*(.*)$").unwrap());

/// Splits a leading `Key: value` metadata block off the document.
///
/// The block consists of consecutive matching lines at the very top of the
/// document and ends at the first blank or non-matching line; a blank
/// separator line is consumed along with the block. Keys are lowercased.
/// Documents without a metadata block are returned untouched.
pub fn split_metadata(input: &str) -> (HashMap<String, String>, String) {
    let mut meta = HashMap::new();
    let lines: Vec<&str> = input.split('\n').collect();

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        if line.trim().is_empty() {
            if idx > 0 {
                idx += 1;
            }
            break;
        }
        match META_RE.captures(line) {
            Some(caps) => {
                meta.insert(caps[1].to_ascii_lowercase(), caps[2].trim().to_string());
                idx += 1;
            }
            None => break,
        }
    }

    if meta.is_empty() {
        return (meta, input.to_string());
    }
    (meta, lines[idx..].join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_and_strips_the_block() {
        let input = "Title: Getting Started\nAuthor: Someone\n\n# Body\n";
        let (meta, body) = split_metadata(input);
        assert_eq!(meta.get("title").unwrap(), "Getting Started");
        assert_eq!(meta.get("author").unwrap(), "Someone");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn keys_are_lowercased() {
        let (meta, _) = split_metadata("TITLE: Loud\n\nbody");
        assert_eq!(meta.get("title").unwrap(), "Loud");
    }

    #[test]
    fn document_without_metadata_is_untouched() {
        let input = "# Heading first\n\nTitle: not metadata here\n";
        let (meta, body) = split_metadata(input);
        assert!(meta.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn document_starting_with_blank_line_is_untouched() {
        let input = "\nTitle: too late\n";
        let (meta, body) = split_metadata(input);
        assert!(meta.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn block_ends_at_first_non_matching_line() {
        let input = "Title: Abrupt\n# Heading right after\n";
        let (meta, body) = split_metadata(input);
        assert_eq!(meta.get("title").unwrap(), "Abrupt");
        assert_eq!(body, "# Heading right after\n");
    }
}
