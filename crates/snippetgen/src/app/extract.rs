//! Snippet marker extraction from individual files.
//!
//! A snippet opens on a line containing `@snippet_begin(Name)` and closes on the next line
//! containing `@snippet_end` for the innermost open snippet. Marker lines are excluded from
//! the code; all lines in between are kept byte for byte, including their line terminators.
//! Snippets may nest, in which case the outer snippet also holds the inner one's body.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::domain::errors::ExtractionError;
use crate::domain::model::{SnippetLocation, SnippetRecord, is_identifier};

static BEGIN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@snippet_begin\(([^)]*)\)").expect("valid begin marker regex"));
static END_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@snippet_end").expect("valid end marker regex"));

/// Source of snippet records for a single file.
///
/// Implementations must not depend on traversal order or on other files.
pub trait SnippetExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<SnippetRecord>, ExtractionError>;
}

impl<F> SnippetExtractor for F
where
    F: Fn(&Path) -> Result<Vec<SnippetRecord>, ExtractionError>,
{
    fn extract(&self, path: &Path) -> Result<Vec<SnippetRecord>, ExtractionError> {
        self(path)
    }
}

/// Extractor for `@snippet_begin(Name)` / `@snippet_end` markers.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerExtractor;

impl MarkerExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse snippets out of already loaded file contents.
    pub fn parse(path: &Path, contents: &[u8]) -> Result<Vec<SnippetRecord>, ExtractionError> {
        let mut open: Vec<OpenSnippet> = Vec::new();
        let mut closed: Vec<SnippetRecord> = Vec::new();

        for (index, line) in contents.split_inclusive(|&b| b == b'\n').enumerate() {
            let line_no = index + 1;

            if let Some(captures) = BEGIN_MARKER.captures(line) {
                let raw = captures.get(1).map_or(&b""[..], |m| m.as_bytes());
                let name = String::from_utf8_lossy(raw).trim().to_owned();
                if !is_identifier(&name) {
                    return Err(ExtractionError::InvalidName {
                        path: path.to_path_buf(),
                        name,
                        line: line_no,
                    });
                }
                open.push(OpenSnippet {
                    name,
                    start_line: line_no,
                    code: Vec::new(),
                });
                continue;
            }

            if END_MARKER.is_match(line) {
                let snippet = open.pop().ok_or_else(|| ExtractionError::UnmatchedEnd {
                    path: path.to_path_buf(),
                    line: line_no,
                })?;
                closed.push(SnippetRecord {
                    name: snippet.name,
                    code: snippet.code,
                    location: SnippetLocation {
                        file: path.to_path_buf(),
                        start_line: snippet.start_line,
                        end_line: line_no,
                    },
                });
                continue;
            }

            for snippet in &mut open {
                snippet.code.extend_from_slice(line);
            }
        }

        if let Some(snippet) = open.pop() {
            return Err(ExtractionError::Unclosed {
                path: path.to_path_buf(),
                name: snippet.name,
                line: snippet.start_line,
            });
        }

        // Inner snippets close first; report in begin-marker order.
        closed.sort_by_key(|record| record.location.start_line);
        Ok(closed)
    }
}

impl SnippetExtractor for MarkerExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<SnippetRecord>, ExtractionError> {
        let contents = fs::read(path).map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }
}

struct OpenSnippet {
    name: String,
    start_line: usize,
    code: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Result;

    fn parse(contents: &str) -> Result<Vec<SnippetRecord>, ExtractionError> {
        MarkerExtractor::parse(Path::new("ex.txt"), contents.as_bytes())
    }

    #[test]
    fn extracts_single_snippet_with_marker_lines() -> Result<()> {
        let records = parse("line one\nline two\n# @snippet_begin(Hello)\nprint(1)\n# @snippet_end\n")?;
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Hello");
        assert_eq!(record.code, b"print(1)\n");
        assert_eq!(record.location.start_line, 3);
        assert_eq!(record.location.end_line, 5);
        assert_eq!(record.location.file, Path::new("ex.txt"));
        Ok(())
    }

    #[test]
    fn keeps_bytes_exactly() -> Result<()> {
        let source = b"// @snippet_begin( Quoted )\r\nlet s = \"a\\tb\";\r\n\t\x01raw\r\n// @snippet_end\r\n";
        let records = MarkerExtractor::parse(Path::new("q.rs"), source)?;
        assert_eq!(records[0].name, "Quoted");
        assert_eq!(records[0].code, b"let s = \"a\\tb\";\r\n\t\x01raw\r\n");
        Ok(())
    }

    #[test]
    fn nested_snippets_in_begin_order() -> Result<()> {
        let records = parse(
            "// @snippet_begin(Outer)\n\
             a\n\
             // @snippet_begin(Inner)\n\
             b\n\
             // @snippet_end\n\
             c\n\
             // @snippet_end\n",
        )?;
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Inner"]);
        assert_eq!(records[0].code, b"a\nb\nc\n");
        assert_eq!((records[0].location.start_line, records[0].location.end_line), (1, 7));
        assert_eq!(records[1].code, b"b\n");
        assert_eq!((records[1].location.start_line, records[1].location.end_line), (3, 5));
        Ok(())
    }

    #[test]
    fn empty_snippet_and_no_markers() -> Result<()> {
        let records = parse("@snippet_begin(Empty)\n@snippet_end")?;
        assert_eq!(records[0].code, b"");
        assert_eq!(records[0].location.end_line, 2);

        assert!(parse("fn main() {}\n")?.is_empty());
        assert!(MarkerExtractor::parse(Path::new("bin"), &[0, 159, 146, 150])?.is_empty());
        Ok(())
    }

    #[test]
    fn reports_malformed_markers() {
        assert!(matches!(
            parse("@snippet_begin(not-valid)\n@snippet_end\n"),
            Err(ExtractionError::InvalidName { line: 1, .. })
        ));
        assert!(matches!(
            parse("x\n@snippet_end\n"),
            Err(ExtractionError::UnmatchedEnd { line: 2, .. })
        ));
        let err = parse("x\n@snippet_begin(Open)\ny\n").unwrap_err();
        assert!(matches!(err, ExtractionError::Unclosed { line: 2, .. }));
        assert!(err.to_string().contains("'Open' is never closed"));
    }

    #[test]
    fn closures_are_extractors() -> Result<()> {
        let extractor = |path: &Path| -> Result<Vec<SnippetRecord>, ExtractionError> {
            MarkerExtractor::parse(path, b"@snippet_begin(A)\nx\n@snippet_end\n")
        };
        assert_eq!(extractor.extract(Path::new("any"))?.len(), 1);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = MarkerExtractor::new()
            .extract(Path::new("/no/such/file.rs"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io { .. }));
    }
}
