// Comment files for offline analysis: a JSON array of strings, or one
// comment per line.

use std::path::Path;

use anyhow::{Context, Result};

/// Parse a comment file's contents. Blank lines are skipped in the
/// line-per-comment form.
pub fn parse_comment_list(raw: &str) -> Result<Vec<String>> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).context("Comment file looks like JSON but is not an array of strings");
    }
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn read_comment_file(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read comment file {}", path.display()))?;
    parse_comment_list(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let comments = parse_comment_list(r#"  ["first", "second, with comma"]"#).unwrap();
        assert_eq!(comments, vec!["first", "second, with comma"]);
    }

    #[test]
    fn test_lines_skip_blanks() {
        let comments = parse_comment_list("great video\n\n  so good  \n").unwrap();
        assert_eq!(comments, vec!["great video", "so good"]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_comment_list("[1, 2, 3]").is_err());
    }
}
