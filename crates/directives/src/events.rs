//! Scan events delivered to observers in document order.

use serde::Serialize;
use serde_yaml::Value;

use mdirective_core::SourceLocation;

use crate::registry::{DirectiveContext, DirectiveDefinition, SCOPED_PREFIX};

/// A located block: front-matter or HTML comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset where the block starts in the document.
    pub start: usize,
    /// Byte offset right after the block (exclusive).
    pub end: usize,
    /// Front-matter body or comment content, untrimmed.
    pub inner: String,
}

/// One discovered key/value pair, resolved or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding<'r> {
    /// Key exactly as written (`_name` for scoped local directives).
    pub key: String,
    /// Matching definition, `None` for an unknown directive.
    pub definition: Option<&'r DirectiveDefinition>,
    /// True only for a local directive written in `_name` form.
    pub scoped: bool,
    /// Where the pair was declared.
    pub context: DirectiveContext,
    /// Parsed right-hand side.
    pub value: Value,
    /// Byte offset of the key in the document.
    pub offset: usize,
}

impl<'r> Finding<'r> {
    /// Whether the key resolved to a known directive.
    pub fn is_known(&self) -> bool {
        self.definition.is_some()
    }

    /// Directive name without the scope prefix.
    pub fn name(&self) -> &str {
        if self.scoped {
            self.key.strip_prefix(SCOPED_PREFIX).unwrap_or(&self.key)
        } else {
            &self.key
        }
    }

    /// Byte range of the key in the document.
    pub fn key_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.key.len()
    }

    /// Line/column of the key in `text` (the scanned document).
    pub fn location(&self, text: &str) -> SourceLocation {
        SourceLocation::from_offset(text, self.offset)
    }
}

/// Lifecycle events emitted by a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScanEvent<'r> {
    /// Always first.
    ScanStarted,
    /// Front-matter block located at offset 0.
    FrontMatterFound(Span),
    /// HTML comment located.
    CommentFound(Span),
    /// Key/value pair found inside the preceding block.
    DirectiveFound(Finding<'r>),
    /// Always last.
    ScanEnded,
}

impl<'r> ScanEvent<'r> {
    /// The finding carried by a `DirectiveFound` event.
    pub fn finding(&self) -> Option<&Finding<'r>> {
        match self {
            ScanEvent::DirectiveFound(finding) => Some(finding),
            _ => None,
        }
    }
}

/// Receives scan events synchronously, one at a time.
///
/// The scanner calls back into caller code only through this trait, so an
/// observer is also the place to record a cancellation request.
pub trait ScanObserver<'r> {
    /// Handle the next event.
    fn on_event(&mut self, event: ScanEvent<'r>);
}

impl<'r> ScanObserver<'r> for Vec<ScanEvent<'r>> {
    fn on_event(&mut self, event: ScanEvent<'r>) {
        self.push(event);
    }
}

impl<'r, F> ScanObserver<'r> for F
where
    F: FnMut(ScanEvent<'r>),
{
    fn on_event(&mut self, event: ScanEvent<'r>) {
        (self)(event)
    }
}

/// Whether the document opts into Marp with `marp: true` in front-matter.
pub fn is_marp_document(findings: &[Finding<'_>]) -> bool {
    findings.iter().any(|finding| {
        finding.context == DirectiveContext::FrontMatter
            && !finding.scoped
            && finding.definition.is_some_and(|d| d.name == "marp")
            && finding.value == Value::Bool(true)
    })
}
