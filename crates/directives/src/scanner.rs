//! Two-phase directive scan: front-matter first, then HTML comments.

use std::sync::Arc;

use serde::Deserialize;

use mdirective_core::{
    BlockExtraction, BlockExtractor, CommentLocator, DashFrontMatter, FrontMatterRecognizer,
    MarkdownCommentLocator, ParseOptions, YamlBlockExtractor,
};

use crate::events::{Finding, ScanEvent, ScanObserver, Span};
use crate::registry::{DirectiveContext, DirectiveRegistry};

/// Scan configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanOptions {
    /// Look for a front-matter block at offset 0.
    pub front_matter: bool,
    /// Look for HTML comments after the front-matter.
    pub comments: bool,
    /// Markdown options used by the default comment locator.
    pub parse: ParseOptions,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            front_matter: true,
            comments: true,
            parse: ParseOptions::markdown(),
        }
    }
}

/// Finds directives in a document and reports them to an observer.
///
/// Holds no per-document state: one scanner can serve any number of
/// sequential or concurrent scans.
pub struct Scanner {
    registry: Arc<DirectiveRegistry>,
    options: ScanOptions,
    front_matter: Box<dyn FrontMatterRecognizer>,
    comments: Option<Box<dyn CommentLocator>>,
    extractor: Box<dyn BlockExtractor>,
}

impl Scanner {
    /// Scanner with the default collaborators.
    pub fn new(registry: Arc<DirectiveRegistry>) -> Self {
        Self {
            registry,
            options: ScanOptions::default(),
            front_matter: Box::new(DashFrontMatter),
            comments: None,
            extractor: Box::new(YamlBlockExtractor),
        }
    }

    /// Replace the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the front-matter recognizer.
    pub fn with_front_matter_recognizer<R>(mut self, recognizer: R) -> Self
    where
        R: FrontMatterRecognizer + 'static,
    {
        self.front_matter = Box::new(recognizer);
        self
    }

    /// Replace the comment locator. `ScanOptions::parse` no longer applies.
    pub fn with_comment_locator<L: CommentLocator + 'static>(mut self, locator: L) -> Self {
        self.comments = Some(Box::new(locator));
        self
    }

    /// Replace the key/value block extractor.
    pub fn with_block_extractor<E: BlockExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Registry used for resolution.
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Active options.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `text`, delivering events to `observer` in document order.
    pub fn scan<'s, O>(&'s self, text: &str, observer: &mut O)
    where
        O: ScanObserver<'s> + ?Sized,
    {
        log::debug!("scan started ({} bytes)", text.len());
        observer.on_event(ScanEvent::ScanStarted);

        let advance = if self.options.front_matter {
            self.scan_front_matter(text, observer)
        } else {
            0
        };

        if self.options.comments {
            self.scan_comments(text, advance, observer);
        }

        observer.on_event(ScanEvent::ScanEnded);
        log::debug!("scan ended");
    }

    /// Scan and collect every event.
    pub fn scan_events(&self, text: &str) -> Vec<ScanEvent<'_>> {
        let mut events = Vec::new();
        self.scan(text, &mut events);
        events
    }

    /// Scan and keep only the findings.
    pub fn findings<'s>(&'s self, text: &str) -> Vec<Finding<'s>> {
        let mut findings = Vec::new();
        self.scan(text, &mut |event: ScanEvent<'s>| {
            if let ScanEvent::DirectiveFound(finding) = event {
                findings.push(finding);
            }
        });
        findings
    }

    /// Emit front-matter events; returns the offset where the body begins.
    fn scan_front_matter<'s, O>(&'s self, text: &str, observer: &mut O) -> usize
    where
        O: ScanObserver<'s> + ?Sized,
    {
        let Some(block) = self.front_matter.recognize(text) else {
            return 0;
        };
        let (Some(_), Some(body)) = (text.get(block.span()), text.get(block.body_range())) else {
            log::warn!("front-matter recognizer returned a block outside the document: {block:?}");
            return 0;
        };

        log::trace!("front-matter found at {:?}", block.span());
        observer.on_event(ScanEvent::FrontMatterFound(Span {
            start: 0,
            end: block.end(),
            inner: body.to_string(),
        }));
        self.emit_findings(body, block.open_len, DirectiveContext::FrontMatter, observer);

        block.end()
    }

    fn scan_comments<'s, O>(&'s self, text: &str, advance: usize, observer: &mut O)
    where
        O: ScanObserver<'s> + ?Sized,
    {
        let rest = &text[advance..];
        let located = match &self.comments {
            Some(locator) => locator.locate(rest),
            None => MarkdownCommentLocator::new(self.options.parse).locate(rest),
        };
        let comments = match located {
            Ok(comments) => comments,
            Err(err) => {
                log::warn!("skipping comment detection: {err}");
                return;
            }
        };

        for comment in comments {
            let (content, left_trim) = trim_comment_content(&comment.inner);
            let content = content.to_string();
            let content_offset = advance + comment.content_start() + left_trim;

            observer.on_event(ScanEvent::CommentFound(Span {
                start: advance + comment.start,
                end: advance + comment.end,
                inner: comment.inner,
            }));
            self.emit_findings(&content, content_offset, DirectiveContext::Comment, observer);
        }
    }

    /// Extract pairs from `block` and emit one finding per pair.
    fn emit_findings<'s, O>(
        &'s self,
        block: &str,
        base_offset: usize,
        context: DirectiveContext,
        observer: &mut O,
    ) where
        O: ScanObserver<'s> + ?Sized,
    {
        let entries = match self.extractor.extract(block) {
            BlockExtraction::Mapping(entries) => entries,
            BlockExtraction::NotAMapping => {
                log::trace!("{context:?} block at {base_offset} is not a mapping");
                return;
            }
            BlockExtraction::ParseError(message) => {
                log::debug!("{context:?} block at {base_offset} failed to parse: {message}");
                return;
            }
        };

        for entry in entries {
            let resolution = self.registry.lookup_scoped(&entry.key, context);
            if resolution.is_none() {
                log::trace!("unknown directive `{}` at {}", entry.key, base_offset + entry.offset);
            }

            observer.on_event(ScanEvent::DirectiveFound(Finding {
                key: entry.key,
                definition: resolution.map(|r| r.definition),
                scoped: resolution.is_some_and(|r| r.scoped),
                context,
                value: entry.value,
                offset: base_offset + entry.offset,
            }));
        }
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("directives", &self.registry.len())
            .field("options", &self.options)
            .field("custom_comment_locator", &self.comments.is_some())
            .finish()
    }
}

/// Strip dash padding and whitespace around comment content.
///
/// Returns the trimmed content and the number of bytes removed on the left.
pub fn trim_comment_content(inner: &str) -> (&str, usize) {
    let is_padding = |c: char| c == '-' || c.is_whitespace();
    let start_trimmed = inner.trim_start_matches(is_padding);
    let left = inner.len() - start_trimmed.len();
    (start_trimmed.trim_end_matches(is_padding), left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdirective_core::{BlockEntry, CommentSpan, FrontMatterBlock, ParseError, Value};

    fn scanner() -> Scanner {
        Scanner::new(Arc::new(DirectiveRegistry::builtin()))
    }

    fn kinds(events: &[ScanEvent<'_>]) -> Vec<&'static str> {
        events
            .iter()
            .map(|event| match event {
                ScanEvent::ScanStarted => "start",
                ScanEvent::FrontMatterFound(_) => "front-matter",
                ScanEvent::CommentFound(_) => "comment",
                ScanEvent::DirectiveFound(_) => "directive",
                ScanEvent::ScanEnded => "end",
            })
            .collect()
    }

    #[test]
    fn trims_dash_padding() {
        assert_eq!(trim_comment_content("- theme: gaia --"), ("theme: gaia", 2));
        assert_eq!(trim_comment_content(" paginate: true "), ("paginate: true", 1));
        assert_eq!(trim_comment_content("\n\ttheme: a\n"), ("theme: a", 2));
        assert_eq!(trim_comment_content("---"), ("", 3));
    }

    #[test]
    fn plain_document_only_has_lifecycle_events() {
        let scanner = scanner();
        let events = scanner.scan_events("# Title\n\nJust text.\n");
        assert_eq!(events, vec![ScanEvent::ScanStarted, ScanEvent::ScanEnded]);
    }

    #[test]
    fn front_matter_offsets_are_absolute() {
        let scanner = scanner();
        let text = "---\nmarp: true\ntheme: gaia\n---\n";
        let findings = scanner.findings(text);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].offset, text.find("theme").unwrap());
        assert_eq!(findings[1].context, DirectiveContext::FrontMatter);
    }

    #[test]
    fn disabled_phases_are_skipped() {
        let text = "---\ntheme: gaia\n---\n\n<!-- paginate: true -->\n";

        let no_fm = scanner().with_options(ScanOptions {
            front_matter: false,
            ..ScanOptions::default()
        });
        let events = no_fm.scan_events(text);
        assert_eq!(kinds(&events), vec!["start", "comment", "directive", "end"]);

        let no_comments = scanner().with_options(ScanOptions {
            comments: false,
            ..ScanOptions::default()
        });
        let events = no_comments.scan_events(text);
        assert_eq!(kinds(&events), vec!["start", "front-matter", "directive", "end"]);
    }

    #[test]
    fn locator_failure_still_ends_scan() {
        struct Failing;
        impl CommentLocator for Failing {
            fn locate(&self, _text: &str) -> Result<Vec<CommentSpan>, ParseError> {
                Err(ParseError::InternalError("boom".into()))
            }
        }

        let scanner = scanner().with_comment_locator(Failing);
        let events = scanner.scan_events("<!-- theme: gaia -->\n");
        assert_eq!(kinds(&events), vec!["start", "end"]);
    }

    #[test]
    fn out_of_range_front_matter_is_ignored() {
        let bogus = |_: &str| -> Option<FrontMatterBlock> {
            Some(FrontMatterBlock {
                open_len: 4,
                body_len: 100,
                close_len: 4,
            })
        };
        let scanner = scanner().with_front_matter_recognizer(bogus);
        let events = scanner.scan_events("---\na: b\n---\n");
        assert_eq!(kinds(&events), vec!["start", "end"]);
    }

    #[test]
    fn custom_extractor_offsets_are_shifted() {
        struct FirstWord;
        impl BlockExtractor for FirstWord {
            fn extract(&self, text: &str) -> BlockExtraction {
                BlockExtraction::Mapping(vec![BlockEntry {
                    key: text.split_whitespace().next().unwrap_or_default().to_string(),
                    value: Value::Null,
                    offset: 0,
                }])
            }
        }

        let text = "Intro\n\n<!--   footer -->\n";
        let scanner = scanner().with_block_extractor(FirstWord);
        let findings = scanner.findings(text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, "footer");
        assert_eq!(findings[0].offset, text.find("footer").unwrap());
        assert!(findings[0].is_known());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ScanOptions =
            serde_json::from_str(r#"{"comments": false, "parse": {"gfm": false}}"#).unwrap();
        assert!(options.front_matter);
        assert!(!options.comments);
        assert!(!options.parse.gfm);
        assert!(options.parse.math);
    }
}
