//! Registry type definitions for directive definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far a directive reaches once declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeClass {
    /// Applies to the whole deck.
    Global,
    /// Applies per slide, from the declaring slide onward. Accepts the `_name` scoped form.
    Local,
}

impl fmt::Display for ScopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeClass::Global => f.write_str("global"),
            ScopeClass::Local => f.write_str("local"),
        }
    }
}

/// Where a directive was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectiveContext {
    /// The leading `---` block.
    FrontMatter,
    /// An HTML comment in the document body.
    Comment,
}

/// Contexts a directive may be declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AllowedContexts {
    /// Allowed in front-matter.
    pub front_matter: bool,
    /// Allowed in HTML comments.
    pub comment: bool,
}

impl AllowedContexts {
    /// Both front-matter and comments.
    pub const BOTH: Self = Self {
        front_matter: true,
        comment: true,
    };

    /// A single context.
    pub const fn only(context: DirectiveContext) -> Self {
        match context {
            DirectiveContext::FrontMatter => Self {
                front_matter: true,
                comment: false,
            },
            DirectiveContext::Comment => Self {
                front_matter: false,
                comment: true,
            },
        }
    }

    /// Whether `context` is allowed.
    pub const fn permits(self, context: DirectiveContext) -> bool {
        match context {
            DirectiveContext::FrontMatter => self.front_matter,
            DirectiveContext::Comment => self.comment,
        }
    }
}

impl Default for AllowedContexts {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Which product defines a directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    /// The Marpit framework.
    Marpit,
    /// Marp Core.
    MarpCore,
    /// Marp CLI (metadata directives).
    MarpCli,
    /// Marp for VS Code.
    MarpVscode,
    /// A user-supplied definition.
    Custom(String),
}

impl Provider {
    fn slug(&self) -> &str {
        match self {
            Provider::Marpit => "marpit",
            Provider::MarpCore => "marp-core",
            Provider::MarpCli => "marp-cli",
            Provider::MarpVscode => "marp-vscode",
            Provider::Custom(name) => name,
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Custom("custom".to_string())
    }
}

impl From<String> for Provider {
    fn from(value: String) -> Self {
        match value.as_str() {
            "marpit" => Provider::Marpit,
            "marp-core" => Provider::MarpCore,
            "marp-cli" => Provider::MarpCli,
            "marp-vscode" => Provider::MarpVscode,
            _ => Provider::Custom(value),
        }
    }
}

impl From<Provider> for String {
    fn from(value: Provider) -> Self {
        value.slug().to_string()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Marpit => f.write_str("Marpit framework"),
            Provider::MarpCore => f.write_str("Marp Core"),
            Provider::MarpCli => f.write_str("Marp CLI"),
            Provider::MarpVscode => f.write_str("Marp for VS Code"),
            Provider::Custom(name) => f.write_str(name),
        }
    }
}

/// A known directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveDefinition {
    /// Directive name as written in source (case-sensitive).
    pub name: String,
    /// Global or local.
    pub scope: ScopeClass,
    /// Where the directive may be declared.
    #[serde(default)]
    pub contexts: AllowedContexts,
    /// Short plain-text description.
    pub description: String,
    /// Extended plain-text details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Defining product.
    #[serde(default)]
    pub provided_by: Provider,
}

impl DirectiveDefinition {
    /// A global directive allowed in every context.
    pub fn global(
        name: impl Into<String>,
        provided_by: Provider,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, ScopeClass::Global, provided_by, description)
    }

    /// A local directive allowed in every context.
    pub fn local(
        name: impl Into<String>,
        provided_by: Provider,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, ScopeClass::Local, provided_by, description)
    }

    fn new(
        name: impl Into<String>,
        scope: ScopeClass,
        provided_by: Provider,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            scope,
            contexts: AllowedContexts::BOTH,
            description: description.into(),
            details: None,
            provided_by,
        }
    }

    /// Attach extended details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Restrict to the given contexts.
    pub fn with_contexts(mut self, contexts: AllowedContexts) -> Self {
        self.contexts = contexts;
        self
    }

    /// Whether the directive may be declared in `context`.
    pub fn permits(&self, context: DirectiveContext) -> bool {
        self.contexts.permits(context)
    }

    /// Whether the `_name` scoped form exists for this directive.
    pub fn has_scoped_form(&self) -> bool {
        self.scope == ScopeClass::Local
    }
}

/// Custom directive definitions loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Definitions appended after the built-ins.
    pub directives: Vec<DirectiveDefinition>,
}
