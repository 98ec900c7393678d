//! HTML comment discovery that honours Markdown block structure.
//!
//! The document is parsed into an MDAST first, so comment-looking text
//! inside fenced code, indented code or inline code spans never surfaces:
//! only raw HTML nodes are searched for `<!-- ... -->`.

use std::ops::Range;

use markdown::mdast::Node;

use crate::ParseError;
use crate::parse::{ParseOptions, parse_mdast};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// A raw HTML comment found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSpan {
    /// Byte offset of `<!--`.
    pub start: usize,
    /// Byte offset right after `-->` (exclusive).
    pub end: usize,
    /// Text between `<!--` and `-->`.
    pub inner: String,
}

impl CommentSpan {
    /// Byte offset where the inner text begins.
    pub fn content_start(&self) -> usize {
        self.start + COMMENT_OPEN.len()
    }

    /// Outer span including the comment markers.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Finds HTML comments in a Markdown text.
pub trait CommentLocator: Send + Sync {
    /// Return every comment in document order, offsets relative to `text`.
    fn locate(&self, text: &str) -> Result<Vec<CommentSpan>, ParseError>;
}

/// Comment locator backed by markdown-rs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownCommentLocator {
    options: ParseOptions,
}

impl MarkdownCommentLocator {
    /// Create a locator with the given parse options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl CommentLocator for MarkdownCommentLocator {
    fn locate(&self, text: &str) -> Result<Vec<CommentSpan>, ParseError> {
        let root = parse_mdast(text, &self.options)?;
        let mut html_ranges = Vec::new();
        collect_html_ranges(&root, &mut html_ranges);

        let mut comments = Vec::new();
        for range in html_ranges {
            let Some(slice) = text.get(range.clone()) else {
                return Err(ParseError::InternalError(format!(
                    "HTML node range {range:?} is outside the document"
                )));
            };
            comments.extend(comments_in(slice).into_iter().map(|mut comment| {
                comment.start += range.start;
                comment.end += range.start;
                comment
            }));
        }

        log::trace!("located {} comment(s)", comments.len());
        Ok(comments)
    }
}

/// Collect source ranges of raw HTML nodes in document order.
fn collect_html_ranges(node: &Node, out: &mut Vec<Range<usize>>) {
    if let Node::Html(html) = node {
        if let Some(position) = &html.position {
            out.push(position.start.offset..position.end.offset);
        }
        return;
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_html_ranges(child, out);
        }
    }
}

/// Scan a raw HTML fragment for comments, offsets relative to `html`.
///
/// `<!-->` and `<!--->` close immediately with empty content. A comment
/// without a closing `-->` is dropped.
pub fn comments_in(html: &str) -> Vec<CommentSpan> {
    let mut comments = Vec::new();
    let mut cursor = 0usize;

    while let Some(found) = html[cursor..].find(COMMENT_OPEN) {
        let start = cursor + found;
        let content_start = start + COMMENT_OPEN.len();
        let rest = &html[content_start..];

        let (inner_end, end) = if rest.starts_with('>') {
            (content_start, content_start + 1)
        } else if rest.starts_with("->") {
            (content_start, content_start + 2)
        } else if let Some(close) = rest.find(COMMENT_CLOSE) {
            let inner_end = content_start + close;
            (inner_end, inner_end + COMMENT_CLOSE.len())
        } else {
            break;
        };

        comments.push(CommentSpan {
            start,
            end,
            inner: html[content_start..inner_end].to_string(),
        });
        cursor = end;
    }

    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(text: &str) -> Vec<CommentSpan> {
        MarkdownCommentLocator::default()
            .locate(text)
            .expect("markdown parsing should succeed")
    }

    #[test]
    fn finds_block_comment() {
        let text = "# Slide\n\n<!-- paginate: true -->\n";
        let comments = locate(text);
        assert_eq!(comments.len(), 1);
        assert_eq!(&text[comments[0].range()], "<!-- paginate: true -->");
        assert_eq!(comments[0].inner, " paginate: true ");
        assert_eq!(comments[0].content_start(), comments[0].start + 4);
    }

    #[test]
    fn finds_inline_comment() {
        let text = "Some text <!-- _class: lead --> more text\n";
        let comments = locate(text);
        assert_eq!(comments.len(), 1);
        assert_eq!(&text[comments[0].range()], "<!-- _class: lead -->");
    }

    #[test]
    fn inline_comments_ignored_when_disabled() {
        let locator = MarkdownCommentLocator::new(ParseOptions {
            inline_html: false,
            ..ParseOptions::markdown()
        });
        let comments = locator.locate("Some text <!-- a: b --> more\n").unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn skips_comments_in_fenced_code() {
        let text = "```html\n<!-- theme: gaia -->\n```\n\n<!-- footer: real -->\n";
        let comments = locate(text);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].inner, " footer: real ");
    }

    #[test]
    fn skips_comments_in_indented_code_and_code_spans() {
        let text = "    <!-- theme: gaia -->\n\nUse `<!-- header: x -->` to set it.\n";
        assert!(locate(text).is_empty());
    }

    #[test]
    fn multiple_comments_in_one_html_block_keep_order() {
        let text = "<!-- a: 1 --><!-- b: 2 -->\n";
        let comments = locate(text);
        let inners: Vec<_> = comments.iter().map(|c| c.inner.as_str()).collect();
        assert_eq!(inners, vec![" a: 1 ", " b: 2 "]);
        assert!(comments[0].end <= comments[1].start);
    }

    #[test]
    fn multiline_comment() {
        let text = "<!--\ntheme: gaia\nclass: lead\n-->\n";
        let comments = locate(text);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].range(), 0..text.len() - 1);
        assert_eq!(comments[0].inner, "\ntheme: gaia\nclass: lead\n");
    }

    #[test]
    fn abrupt_empty_comments() {
        let spans = comments_in("<!--><!--->");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].range(), 0..5);
        assert_eq!(spans[1].range(), 5..11);
        assert!(spans.iter().all(|c| c.inner.is_empty()));
    }

    #[test]
    fn unterminated_comment_is_dropped() {
        assert!(comments_in("<div><!-- never closed").is_empty());
    }

    #[test]
    fn ignores_non_comment_html() {
        assert!(locate("<div class=\"x\">\n\nhello\n\n</div>\n").is_empty());
    }
}
