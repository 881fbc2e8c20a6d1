//! In-place updates of `.env` files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{DatasightError, Result};

/// Set `key` in a `.env` file, keeping every other line as it was.
///
/// An existing `key=` line is replaced; otherwise the entry is appended.
/// The file is created when it does not exist.
pub fn upsert(path: impl AsRef<Path>, key: &str, value: &str) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| DatasightError::Io {
        path: path.to_path_buf(),
        source,
    };

    if key.is_empty() || key.contains('=') || key.contains(char::is_whitespace) {
        return Err(DatasightError::Config(format!("invalid variable name: {:?}", key)));
    }
    if value.contains('\n') || value.contains('"') {
        return Err(DatasightError::Config(format!(
            "value for {} may not contain newlines or quotes",
            key
        )));
    }

    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(io_err(e)),
    };

    let entry = format!("{}=\"{}\"", key, value);
    let prefix = format!("{}=", key);
    let mut found = false;
    let mut lines: Vec<String> = existing
        .lines()
        .map(|line| {
            if line.starts_with(&prefix) {
                found = true;
                entry.clone()
            } else {
                line.to_string()
            }
        })
        .collect();
    if !found {
        lines.push(entry);
    }

    fs::write(path, lines.join("\n") + "\n").map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");

        upsert(&path, "GEMINI_MODEL", "gemini-2.5-flash").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "GEMINI_MODEL=\"gemini-2.5-flash\"\n"
        );
    }

    #[test]
    fn test_replaces_and_preserves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "# keys\nGEMINI_API_KEY=old\nOTHER=1\n").unwrap();

        upsert(&path, "GEMINI_API_KEY", "new").unwrap();
        upsert(&path, "GEMINI_MODEL", "m").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# keys\nGEMINI_API_KEY=\"new\"\nOTHER=1\nGEMINI_MODEL=\"m\"\n"
        );
    }

    #[test]
    fn test_prefix_must_match_whole_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "GEMINI_MODEL_X=1\n").unwrap();

        upsert(&path, "GEMINI_MODEL", "m").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "GEMINI_MODEL_X=1\nGEMINI_MODEL=\"m\"\n"
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        assert!(upsert(&path, "BAD KEY", "v").is_err());
        assert!(upsert(&path, "KEY", "a\nb").is_err());
        assert!(!path.exists());
    }
}
