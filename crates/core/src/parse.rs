//! Markdown parsing options and the markdown-rs adapter.

use crate::{ParseError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};
use serde::Deserialize;

/// Parser options for building markdown-rs parse options.
///
/// Block-level raw HTML is always enabled: comments are only visible to the
/// locator as HTML nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Recognize HTML (and therefore comments) inside paragraphs.
    pub inline_html: bool,
    /// Enable math constructs ($inline$ and $$block$$).
    pub math: bool,
}

impl ParseOptions {
    /// Markdown-friendly defaults matching the Marp toolchain.
    pub const fn markdown() -> Self {
        Self {
            gfm: true,
            code_indented: true,
            inline_html: true,
            math: true,
        }
    }

    /// Plain CommonMark without extensions.
    pub const fn commonmark() -> Self {
        Self {
            gfm: false,
            code_indented: true,
            inline_html: true,
            math: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: false,
            code_indented: self.code_indented,
            html_flow: true,
            html_text: self.inline_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Parse markdown into an MDAST tree using core options.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| {
        ParseError::MarkdownAdapter {
            message: err.to_string(),
            location: message_location(&err),
        }
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
