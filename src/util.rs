use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parses a two-column comma separated table into `(key, value)` pairs.
///
/// The first line is a header and is always skipped. Blank lines and lines
/// starting with `#` are ignored. Only the first comma separates the
/// columns; a row without a comma yields an empty value. Keys are trimmed
/// and lowercased, values are trimmed.
pub fn parse_two_column_table(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .skip(1)
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once(',').unwrap_or((line, ""));
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                warn!("Skipping table row {} with an empty key: '{}'", index + 2, line);
                return None;
            }
            Some((key, value.trim().to_string()))
        })
        .collect()
}

/// Reads and parses a two-column table from disk
pub fn read_two_column_table(path: impl AsRef<Path>) -> Result<Vec<(String, String)>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read table {}", path.display()))?;
    Ok(parse_two_column_table(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_header_and_blank_rows() {
        let table = "name,role\nCI,automation\n\n# comment\nroot, role \nlonely\n,orphan\n";
        let rows = parse_two_column_table(table);
        assert_eq!(
            rows,
            vec![
                ("ci".to_string(), "automation".to_string()),
                ("root".to_string(), "role".to_string()),
                ("lonely".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "term,canonical\nclazz,class\ncrud,").unwrap();
        let rows = read_two_column_table(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ("crud".to_string(), String::new()));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_two_column_table("/nonexistent/table.csv").is_err());
    }
}
