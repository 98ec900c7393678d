use std::ops::Range;

/// Delimited front-matter block located at the very start of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatterBlock {
    /// Length of the opening delimiter line, including its line terminator.
    pub open_len: usize,
    /// Length of the body between the delimiters.
    pub body_len: usize,
    /// Length of the closing delimiter line, including its line terminator when present.
    pub close_len: usize,
}

impl FrontMatterBlock {
    /// Byte range of the body inside the document.
    pub fn body_range(&self) -> Range<usize> {
        self.open_len..self.open_len + self.body_len
    }

    /// Byte offset right after the closing delimiter.
    pub fn end(&self) -> usize {
        self.open_len + self.body_len + self.close_len
    }

    /// Full outer span (open delimiter + body + close delimiter).
    pub fn span(&self) -> Range<usize> {
        0..self.end()
    }
}

/// Recognizes a front-matter block at offset 0 of a document.
pub trait FrontMatterRecognizer: Send + Sync {
    /// Return the block layout when `text` opens with front-matter.
    fn recognize(&self, text: &str) -> Option<FrontMatterBlock>;
}

impl<F> FrontMatterRecognizer for F
where
    F: Fn(&str) -> Option<FrontMatterBlock> + Send + Sync,
{
    fn recognize(&self, text: &str) -> Option<FrontMatterBlock> {
        (self)(text)
    }
}

/// `---` fenced front-matter, matched only at offset 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashFrontMatter;

impl FrontMatterRecognizer for DashFrontMatter {
    fn recognize(&self, text: &str) -> Option<FrontMatterBlock> {
        find_front_matter(text)
    }
}

/// Locate a `---` fenced block that starts at offset 0 of `input`.
///
/// Unlike a lenient YAML loader, no BOM or leading blank lines are skipped:
/// a delimiter anywhere but the first line never opens front-matter.
pub fn find_front_matter(input: &str) -> Option<FrontMatterBlock> {
    let (first, open_end) = next_line(input, 0)?;
    if !is_delimiter(first) {
        return None;
    }

    let mut cursor = open_end;
    while let Some((line, next_cursor)) = next_line(input, cursor) {
        if is_delimiter(line) {
            return Some(FrontMatterBlock {
                open_len: open_end,
                body_len: cursor - open_end,
                close_len: next_cursor - cursor,
            });
        }
        cursor = next_cursor;
    }

    None
}

/// Returns the line starting at `start` (without `\n`) and the offset of the next line.
fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }

    let bytes = &input.as_bytes()[start..];
    if let Some(pos) = bytes.iter().position(|b| *b == b'\n') {
        let line_end = start + pos;
        let line = &input[start..line_end];
        Some((line, line_end + 1))
    } else {
        Some((&input[start..], input.len()))
    }
}

fn is_delimiter(line: &str) -> bool {
    normalize_line(line) == "---"
}

fn normalize_line(line: &str) -> &str {
    line.trim_end_matches('\r').trim_end_matches([' ', '\t'])
}
