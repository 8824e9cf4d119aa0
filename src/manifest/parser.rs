use regex::Regex;

const FILE_MARKER_PATTERN: &str = r"^--- FILE: (.*) ---\s*$";
const CONTENT_MARKER: &str = "CONTENT";
const FENCE: &str = "```";

/// One extracted block: a manifest-supplied relative path (already trimmed)
/// and the raw text found between its fences. Content normalization happens
/// at write time, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub relative_path: String,
    pub content: String,
}

impl FileEntry {
    pub fn new<P: Into<String>, C: Into<String>>(relative_path: P, content: C) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }

    pub fn content_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

enum ParseState {
    Scanning,
    AwaitContent { path: String },
    AwaitFence { path: String },
    InBody { path: String, body: String },
}

/// Line-oriented scanner for manifest blocks of the shape:
///
/// ````text
/// --- FILE: relative/path.ext ---
/// CONTENT
/// ```lang
/// ...verbatim body...
/// ```
/// ````
///
/// The language tag is optional and ignored. The first closing fence after an
/// opening fence terminates the block. Lines that break a partially matched
/// block are re-examined as potential new markers, so a malformed block never
/// hides a later well-formed one.
pub struct BlockParser {
    file_marker: Regex,
}

impl BlockParser {
    pub fn new() -> Self {
        Self {
            file_marker: Regex::new(FILE_MARKER_PATTERN).expect("file marker pattern is valid"),
        }
    }

    /// Extracts all blocks in order of appearance. Zero matches is a valid,
    /// empty result, not an error.
    pub fn parse(&self, text: &str) -> Vec<FileEntry> {
        let mut entries = Vec::new();
        let mut state = ParseState::Scanning;

        for line in text.lines() {
            state = self.step(state, line, &mut entries);
        }

        // A block still open at end of input never saw its closing fence and
        // is discarded.
        entries
    }

    fn step(&self, state: ParseState, line: &str, entries: &mut Vec<FileEntry>) -> ParseState {
        match state {
            ParseState::Scanning => self.scan_line(line),
            ParseState::AwaitContent { path } => {
                if line.trim().is_empty() {
                    ParseState::AwaitContent { path }
                } else if line.trim() == CONTENT_MARKER {
                    ParseState::AwaitFence { path }
                } else {
                    self.scan_line(line)
                }
            }
            ParseState::AwaitFence { path } => {
                if is_opening_fence(line) {
                    ParseState::InBody {
                        path,
                        body: String::new(),
                    }
                } else {
                    self.scan_line(line)
                }
            }
            ParseState::InBody { path, mut body } => {
                if is_closing_fence(line) {
                    entries.push(FileEntry::new(path, body));
                    ParseState::Scanning
                } else {
                    body.push_str(line);
                    body.push('\n');
                    ParseState::InBody { path, body }
                }
            }
        }
    }

    fn scan_line(&self, line: &str) -> ParseState {
        match self.file_marker.captures(line) {
            Some(captures) => ParseState::AwaitContent {
                path: captures[1].trim().to_string(),
            },
            None => ParseState::Scanning,
        }
    }

    pub fn get_statistics(&self, entries: &[FileEntry]) -> ParseStatistics {
        let total_bytes = entries.iter().map(FileEntry::content_bytes).sum();

        let mut seen = std::collections::HashSet::new();
        let duplicate_paths = entries
            .iter()
            .filter(|e| !seen.insert(e.relative_path.as_str()))
            .count();

        ParseStatistics {
            total_entries: entries.len(),
            total_bytes,
            duplicate_paths,
        }
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_opening_fence(line: &str) -> bool {
    match line.trim_end().strip_prefix(FENCE) {
        Some(tag) => tag.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

fn is_closing_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

#[derive(Debug, Clone)]
pub struct ParseStatistics {
    pub total_entries: usize,
    pub total_bytes: u64,
    pub duplicate_paths: usize,
}

impl ParseStatistics {
    pub fn display_summary(&self) -> String {
        format!(
            "Parsed {} entries ({} bytes of content, {} duplicate paths)",
            self.total_entries, self.total_bytes, self.duplicate_paths
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(path: &str, body: &str) -> String {
        format!("--- FILE: {} ---\nCONTENT\n```\n{}```\n", path, body)
    }

    #[test]
    fn test_single_block() {
        let parser = BlockParser::new();
        let entries = parser.parse(&block("src/main.rs", "fn main() {}\n"));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relative_path, "src/main.rs");
        assert_eq!(entries[0].content, "fn main() {}\n");
    }

    #[test]
    fn test_multiple_blocks_preserve_order() {
        let parser = BlockParser::new();
        let manifest = format!(
            "{}\nsome prose in between\n{}",
            block("a.txt", "first\n"),
            block("b/c.txt", "second\n")
        );

        let entries = parser.parse(&manifest);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].relative_path, "a.txt");
        assert_eq!(entries[1].relative_path, "b/c.txt");
    }

    #[test]
    fn test_zero_blocks_is_empty_not_error() {
        let parser = BlockParser::new();
        assert!(parser.parse("just some text\nno blocks here\n").is_empty());
        assert!(parser.parse("").is_empty());
    }

    #[test]
    fn test_language_tag_is_ignored() {
        let parser = BlockParser::new();
        let manifest = "--- FILE: lib.py ---\nCONTENT\n```python\nprint('hi')\n```\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "print('hi')\n");
    }

    #[test]
    fn test_empty_body() {
        let parser = BlockParser::new();
        let entries = parser.parse("--- FILE: empty.txt ---\nCONTENT\n```\n```\n");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "");
    }

    #[test]
    fn test_blank_lines_before_content_marker() {
        let parser = BlockParser::new();
        let manifest = "--- FILE: a.txt ---\n\n\nCONTENT\n```\nbody\n```\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "body\n");
    }

    #[test]
    fn test_path_is_trimmed() {
        let parser = BlockParser::new();
        let manifest = "--- FILE:   spaced/path.txt   ---\nCONTENT\n```\nx\n```\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries[0].relative_path, "spaced/path.txt");
    }

    #[test]
    fn test_empty_path_still_yields_entry() {
        let parser = BlockParser::new();
        let manifest = "--- FILE:  ---\nCONTENT\n```\nx\n```\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relative_path, "");
    }

    #[test]
    fn test_first_closing_fence_terminates() {
        let parser = BlockParser::new();
        let manifest = "--- FILE: a.md ---\nCONTENT\n```\nline one\n```\nline two\n```\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "line one\n");
    }

    #[test]
    fn test_tagged_fence_inside_body_does_not_close() {
        let parser = BlockParser::new();
        let manifest = "--- FILE: doc.md ---\nCONTENT\n```\nbefore\n```rust\nafter\n```\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "before\n```rust\nafter\n");
    }

    #[test]
    fn test_malformed_block_does_not_hide_later_block() {
        let parser = BlockParser::new();
        let manifest = format!(
            "--- FILE: broken.txt ---\nno content marker here\n{}",
            block("good.txt", "ok\n")
        );

        let entries = parser.parse(&manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relative_path, "good.txt");
    }

    #[test]
    fn test_marker_interrupting_pending_block_wins() {
        let parser = BlockParser::new();
        let manifest = "--- FILE: first.txt ---\n--- FILE: second.txt ---\nCONTENT\n```\nx\n```\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relative_path, "second.txt");
    }

    #[test]
    fn test_unterminated_block_is_discarded() {
        let parser = BlockParser::new();
        let manifest = "--- FILE: open.txt ---\nCONTENT\n```\nnever closed\n";

        assert!(parser.parse(manifest).is_empty());
    }

    #[test]
    fn test_duplicate_paths_counted_in_statistics() {
        let parser = BlockParser::new();
        let manifest = format!("{}{}", block("same.txt", "v1\n"), block("same.txt", "v2\n"));

        let entries = parser.parse(&manifest);
        assert_eq!(entries.len(), 2);

        let stats = parser.get_statistics(&entries);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.duplicate_paths, 1);
        assert!(stats.display_summary().contains("2 entries"));
    }

    #[test]
    fn test_crlf_manifest() {
        let parser = BlockParser::new();
        let manifest = "--- FILE: a.txt ---\r\nCONTENT\r\n```\r\nbody\r\n```\r\n";

        let entries = parser.parse(manifest);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relative_path, "a.txt");
        // str::lines strips the trailing \r of each line
        assert_eq!(entries[0].content, "body\n");
    }
}
