#![deny(missing_docs)]
//! mdirective: directive detection for Marp-flavoured Markdown.
//!
//! A [`Scanner`] looks for `key: value` directives in a document's leading
//! front-matter and in its HTML comments, resolves every key against a
//! shared [`DirectiveRegistry`], and streams [`ScanEvent`]s in document
//! order to a [`ScanObserver`].
//!
//! ```
//! use std::sync::Arc;
//! use mdirective::{DirectiveRegistry, Scanner};
//!
//! let registry = Arc::new(DirectiveRegistry::builtin());
//! let scanner = Scanner::new(registry);
//!
//! let findings = scanner.findings("---\ntheme: gaia\n---\n\n<!-- _class: lead -->\n");
//! assert_eq!(findings.len(), 2);
//! assert_eq!(findings[1].name(), "class");
//! assert!(findings[1].scoped);
//! ```

/// Parallel scanning of many documents.
pub mod batch;
/// Registry, config and batch error types.
pub mod error;
/// Scan events and observers.
pub mod events;
/// Directive definitions and resolution.
pub mod registry;
/// The directive scanner.
pub mod scanner;

pub use batch::{BatchInput, BatchOptions, BatchOutput, BatchResult, BatchStats, scan_batch};
pub use error::{BatchError, ConfigError, RegistryError};
pub use events::{Finding, ScanEvent, ScanObserver, Span, is_marp_document};
pub use registry::{
    AllowedContexts, DirectiveContext, DirectiveDefinition, DirectiveRegistry, Provider,
    RegistryConfig, Resolution, SCOPED_PREFIX, ScopeClass,
};
pub use scanner::{ScanOptions, Scanner, trim_comment_content};

pub use mdirective_core::{ParseOptions, SourceLocation, Value};
