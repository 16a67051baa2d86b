//! Flat-file line source
//!
//! The base file starts with a header row that carries no record data; it is
//! skipped unconditionally. The remaining lines come back in file order.

use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Read the record lines of a base file, skipping the header row and any
/// blank lines.
pub async fn read_lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let file = File::open(path.as_ref()).await?;
    let mut lines = BufReader::new(file).lines();

    // header row, never a record
    lines.next_line().await?;

    let mut records = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            records.push(line);
        }
    }

    debug!(path = %path.as_ref().display(), lines = records.len(), "file read");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_skips_header_line() {
        let file = base_file("CPF PRIVATE INCOMPLETE\n111 1 0\n222 0 1\n");
        let lines = read_lines(file.path()).await.unwrap();
        assert_eq!(lines, vec!["111 1 0", "222 0 1"]);
    }

    #[tokio::test]
    async fn test_header_only_file_yields_no_lines() {
        let file = base_file("CPF PRIVATE INCOMPLETE\n");
        let lines = read_lines(file.path()).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_blank_lines_dropped() {
        let file = base_file("header\n111 1 0\n\n   \n222 0 1\n\n");
        let lines = read_lines(file.path()).await.unwrap();
        assert_eq!(lines, vec!["111 1 0", "222 0 1"]);
    }

    #[tokio::test]
    async fn test_missing_file_errors() {
        assert!(read_lines("/nonexistent/base.txt").await.is_err());
    }
}
