//! Source text holder for diagnostics.

/// Holds the text of one source file, with cached line starts so error
/// reporting can pull out individual lines cheaply.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Extract a source line by 1-based line number.
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line(&self, line_number: u32) -> Option<&str> {
        let idx = line_number.checked_sub(1)? as usize;
        if idx >= self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[idx];
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_extraction() {
        let src = SourceFile::new("demo.pas", "var x := 1;\nprint x;\nx := 2;");
        assert_eq!(src.line(1), Some("var x := 1;"));
        assert_eq!(src.line(2), Some("print x;"));
        assert_eq!(src.line(3), Some("x := 2;"));
        assert_eq!(src.line(0), None);
        assert_eq!(src.line(4), None);
    }

    #[test]
    fn test_crlf_lines() {
        let src = SourceFile::new("demo.pas", "begin\r\nend\r\n");
        assert_eq!(src.line(1), Some("begin"));
        assert_eq!(src.line(2), Some("end"));
    }

    #[test]
    fn test_empty_source() {
        let src = SourceFile::new("demo.pas", "");
        assert_eq!(src.line_count(), 1);
        assert_eq!(src.line(1), Some(""));
    }
}
