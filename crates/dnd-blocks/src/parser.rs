//! Block parsing for marker-delimited regions.
//!
//! A block starts at any line beginning with the marker prefix and ends at the
//! next such line. A block whose closing marker never arrives (a file truncated
//! by an earlier crash, say) is discarded rather than returned partially.

/// A parsed block with its marker lines, body and position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The opening marker line, without its line terminator.
    pub header: String,
    /// The closing marker line, without its line terminator.
    pub footer: String,
    /// The body lines between the markers, without line terminators.
    pub lines: Vec<String>,
    /// The 1-based line number of the opening marker, zero for a block that
    /// was not read from content.
    pub start_line: usize,
    /// The 1-based line number of the closing marker, zero for a block that
    /// was not read from content.
    pub end_line: usize,
    /// Whether the closing marker line ends in a newline. Only the last line
    /// of a file can lack one.
    pub terminated: bool,
}

impl Block {
    /// A new block bracketed by `marker` on both sides, every line terminated.
    ///
    /// # Example
    /// ```
    /// use dnd_blocks::Block;
    ///
    /// let block = Block::new("#dnd01", &["127.0.0.1 example.com"]);
    /// assert_eq!(block.text(), "#dnd01\n127.0.0.1 example.com\n#dnd01\n");
    /// ```
    pub fn new<S: AsRef<str>>(marker: &str, lines: &[S]) -> Self {
        Self {
            header: marker.to_string(),
            footer: marker.to_string(),
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
            start_line: 0,
            end_line: 0,
            terminated: true,
        }
    }

    /// The exact text this block occupies in a file.
    pub fn text(&self) -> String {
        let mut text = String::new();
        text.push_str(&self.header);
        text.push('\n');
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(&self.footer);
        if self.terminated {
            text.push('\n');
        }
        text
    }
}

/// Parses all blocks delimited by lines starting with `prefix`.
///
/// # Returns
/// A vector of all complete blocks, in order of appearance.
///
/// # Example
/// ```
/// use dnd_blocks::parser::parse_blocks;
///
/// let content = "127.0.0.1 localhost\n#dndabc\n127.0.0.1 example.com\n#dndabc\n";
///
/// let blocks = parse_blocks(content, "#dnd");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].lines, vec!["127.0.0.1 example.com".to_string()]);
/// ```
pub fn parse_blocks(content: &str, prefix: &str) -> Vec<Block> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut blocks = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        if !lines[i].starts_with(prefix) {
            i += 1;
            continue;
        }

        let start = i;
        let Some(offset) = lines[start + 1..]
            .iter()
            .position(|line| line.starts_with(prefix))
        else {
            tracing::debug!(
                line = start + 1,
                "Discarding unterminated block at end of content"
            );
            break;
        };
        let end = start + 1 + offset;

        blocks.push(Block {
            header: lines[start].to_string(),
            footer: lines[end].to_string(),
            lines: lines[start + 1..end].iter().map(|l| l.to_string()).collect(),
            start_line: start + 1,
            end_line: end + 1,
            terminated: end + 1 < lines.len(),
        });

        i = end + 1;
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_empty() {
        assert!(parse_blocks("", "#dnd").is_empty());
        assert!(parse_blocks("127.0.0.1 localhost\n", "#dnd").is_empty());
    }

    #[test]
    fn test_parse_single_block() {
        let content = "#dnd01\n127.0.0.1 example.com\n#dnd01\n";
        let blocks = parse_blocks(content, "#dnd");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header, "#dnd01");
        assert_eq!(blocks[0].footer, "#dnd01");
        assert_eq!(blocks[0].lines, vec!["127.0.0.1 example.com"]);
    }

    #[test]
    fn test_text_reproduces_source() {
        let content = "#dnd01\n127.0.0.1 a.com b.com\n#dnd01\n";
        let blocks = parse_blocks(content, "#dnd");
        assert_eq!(blocks[0].text(), content);
    }

    #[test]
    fn test_text_reproduces_footer_at_end_of_file() {
        let content = "127.0.0.1 localhost\n#dnd01\n127.0.0.1 a.com\n#dnd01";
        let blocks = parse_blocks(content, "#dnd");
        assert!(!blocks[0].terminated);
        assert_eq!(blocks[0].text(), "#dnd01\n127.0.0.1 a.com\n#dnd01");
        assert!(content.ends_with(&blocks[0].text()));
    }

    #[test]
    fn test_unterminated_block_is_discarded() {
        let content = "#dnd01\n127.0.0.1 a.com\n#dnd01\n#dnd02\n127.0.0.1 b.com\n";
        let blocks = parse_blocks(content, "#dnd");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header, "#dnd01");
    }
}
