#![deny(missing_docs)]
//! mdirective core: the parsing collaborators behind directive scanning.
//!
//! Front-matter recognition, Markdown-aware HTML comment discovery and
//! permissive key/value extraction. None of these know about directives.

/// Key/value block extraction.
pub mod blocks;
/// HTML comment discovery.
pub mod comments;
/// Core error and source location types.
pub mod error;
/// Front-matter recognition.
pub mod frontmatter;
/// Markdown parsing options and the markdown-rs adapter.
pub mod parse;

pub use blocks::{BlockEntry, BlockExtraction, BlockExtractor, YamlBlockExtractor, extract_block};
pub use comments::{CommentLocator, CommentSpan, MarkdownCommentLocator, comments_in};
pub use error::{ParseError, SourceLocation};
pub use frontmatter::{DashFrontMatter, FrontMatterBlock, FrontMatterRecognizer, find_front_matter};
pub use parse::{ParseOptions, parse_mdast};

/// Re-export of the value type carried by extracted pairs.
pub use serde_yaml::Value;
