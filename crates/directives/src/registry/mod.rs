//! Directive registry: the catalog of known directives and name resolution.
//!
//! A registry is built once (built-ins plus optional custom definitions) and
//! then shared read-only, typically behind an `Arc`, by every scanner.

/// Built-in directive catalog.
pub mod defaults;
/// Registry data types.
pub mod types;

use std::collections::HashMap;
use std::collections::HashSet;

pub use defaults::builtin_definitions;
pub use types::{
    AllowedContexts, DirectiveContext, DirectiveDefinition, Provider, RegistryConfig, ScopeClass,
};

use crate::error::{ConfigError, RegistryError};

/// Prefix marking the scoped form of a local directive.
pub const SCOPED_PREFIX: char = '_';

/// Result of resolving a raw key against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'r> {
    /// Matched definition.
    pub definition: &'r DirectiveDefinition,
    /// Whether the key used the `_name` scoped form.
    pub scoped: bool,
}

/// Catalog of directive definitions, unique by name.
#[derive(Debug, Clone, Default)]
pub struct DirectiveRegistry {
    definitions: Vec<DirectiveDefinition>,
    by_name: HashMap<String, usize>,
}

impl DirectiveRegistry {
    /// A registry without any definitions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for definition in builtin_definitions() {
            registry.insert(definition);
        }
        registry
    }

    /// Built-ins extended with the definitions from `config`.
    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin();
        registry.extend(config.directives)?;
        Ok(registry)
    }

    /// Built-ins extended with a JSON `RegistryConfig`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        Ok(Self::from_config(config)?)
    }

    /// Built-ins extended with a YAML `RegistryConfig`.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_yaml::from_str(yaml)?;
        Ok(Self::from_config(config)?)
    }

    /// Add a definition. Fails without modifying the registry when the name is taken.
    pub fn register(&mut self, definition: DirectiveDefinition) -> Result<(), RegistryError> {
        self.validate(&definition)?;
        self.insert(definition);
        Ok(())
    }

    /// Add several definitions; either all are added or none.
    pub fn extend<I>(&mut self, definitions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = DirectiveDefinition>,
    {
        let definitions: Vec<_> = definitions.into_iter().collect();
        let mut batch_names = HashSet::new();
        for definition in &definitions {
            self.validate(definition)?;
            if !batch_names.insert(definition.name.as_str()) {
                return Err(RegistryError::DuplicateName(definition.name.clone()));
            }
        }

        for definition in definitions {
            self.insert(definition);
        }
        Ok(())
    }

    fn validate(&self, definition: &DirectiveDefinition) -> Result<(), RegistryError> {
        if definition.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if definition.description.trim().is_empty() {
            return Err(RegistryError::MissingDescription(definition.name.clone()));
        }
        if self.by_name.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateName(definition.name.clone()));
        }
        Ok(())
    }

    fn insert(&mut self, definition: DirectiveDefinition) {
        log::trace!("registering directive `{}`", definition.name);
        self.by_name
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(definition);
    }

    /// Definition named exactly `name`, regardless of context.
    pub fn get(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.by_name.get(name).map(|&idx| &self.definitions[idx])
    }

    /// Definition named exactly `name` that may be declared in `context`.
    pub fn lookup(&self, name: &str, context: DirectiveContext) -> Option<&DirectiveDefinition> {
        self.get(name).filter(|definition| definition.permits(context))
    }

    /// Resolve a raw key as written in source.
    ///
    /// An exact name match wins. Otherwise a `_`-prefixed key resolves to the
    /// local directive named by the rest of the key. Global directives have
    /// no scoped form.
    pub fn lookup_scoped(
        &self,
        raw_key: &str,
        context: DirectiveContext,
    ) -> Option<Resolution<'_>> {
        if let Some(definition) = self.lookup(raw_key, context) {
            return Some(Resolution {
                definition,
                scoped: false,
            });
        }

        let name = raw_key.strip_prefix(SCOPED_PREFIX)?;
        self.lookup(name, context)
            .filter(|definition| definition.has_scoped_form())
            .map(|definition| Resolution {
                definition,
                scoped: true,
            })
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DirectiveDefinition> {
        self.definitions.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Keys that resolve in `context`, scoped forms included, for autocomplete.
    pub fn completions(&self, context: DirectiveContext) -> Vec<String> {
        let mut keys = Vec::new();
        for definition in self.iter().filter(|d| d.permits(context)) {
            keys.push(definition.name.clone());
            if definition.has_scoped_form() {
                keys.push(format!("{SCOPED_PREFIX}{}", definition.name));
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FM: DirectiveContext = DirectiveContext::FrontMatter;
    const COMMENT: DirectiveContext = DirectiveContext::Comment;

    #[test]
    fn exact_lookup() {
        let registry = DirectiveRegistry::builtin();
        let theme = registry.lookup("theme", FM).unwrap();
        assert_eq!(theme.scope, ScopeClass::Global);
        assert!(registry.lookup("Theme", FM).is_none());
        assert!(registry.lookup("customUnknownKey", COMMENT).is_none());
    }

    #[test]
    fn scoped_local_directive_resolves() {
        let registry = DirectiveRegistry::builtin();
        let resolution = registry.lookup_scoped("_header", COMMENT).unwrap();
        assert_eq!(resolution.definition.name, "header");
        assert!(resolution.scoped);

        let plain = registry.lookup_scoped("header", COMMENT).unwrap();
        assert!(!plain.scoped);
    }

    #[test]
    fn global_directive_has_no_scoped_alias() {
        let registry = DirectiveRegistry::builtin();
        assert!(registry.lookup_scoped("_marp", FM).is_none());
        assert!(registry.lookup_scoped("_theme", COMMENT).is_none());
    }

    #[test]
    fn double_prefix_does_not_resolve() {
        let registry = DirectiveRegistry::builtin();
        assert!(registry.lookup_scoped("__class", COMMENT).is_none());
        assert!(registry.lookup_scoped("_", COMMENT).is_none());
    }

    #[test]
    fn exact_match_beats_scoped_match() {
        let mut registry = DirectiveRegistry::builtin();
        registry
            .register(DirectiveDefinition::global(
                "_class",
                Provider::Custom("test".into()),
                "Literal underscore name.",
            ))
            .unwrap();

        let resolution = registry.lookup_scoped("_class", COMMENT).unwrap();
        assert_eq!(resolution.definition.name, "_class");
        assert!(!resolution.scoped);
    }

    #[test]
    fn context_restrictions_apply_to_both_rules() {
        let mut registry = DirectiveRegistry::empty();
        registry
            .register(
                DirectiveDefinition::local("note", Provider::default(), "Speaker note.")
                    .with_contexts(AllowedContexts::only(COMMENT)),
            )
            .unwrap();

        assert!(registry.lookup_scoped("note", FM).is_none());
        assert!(registry.lookup_scoped("_note", FM).is_none());
        assert!(registry.lookup_scoped("_note", COMMENT).unwrap().scoped);
    }

    #[test]
    fn duplicate_registration_fails_without_corruption() {
        let mut registry = DirectiveRegistry::builtin();
        let before = registry.len();
        let err = registry
            .register(DirectiveDefinition::local("paginate", Provider::default(), "Again."))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("paginate".into()));
        assert_eq!(registry.len(), before);
        assert_eq!(registry.get("paginate").unwrap().provided_by, Provider::Marpit);
    }

    #[test]
    fn extend_is_all_or_nothing() {
        let mut registry = DirectiveRegistry::builtin();
        let before = registry.len();
        let err = registry
            .extend(vec![
                DirectiveDefinition::local("transition", Provider::default(), "Transition."),
                DirectiveDefinition::local("transition", Provider::default(), "Again."),
            ])
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("transition".into()));
        assert_eq!(registry.len(), before);
        assert!(registry.get("transition").is_none());
    }

    #[test]
    fn rejects_empty_name_and_description() {
        let mut registry = DirectiveRegistry::empty();
        assert_eq!(
            registry.register(DirectiveDefinition::global("", Provider::default(), "x")),
            Err(RegistryError::EmptyName)
        );
        assert_eq!(
            registry.register(DirectiveDefinition::global("x", Provider::default(), "  ")),
            Err(RegistryError::MissingDescription("x".into()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn loads_custom_definitions_from_yaml() {
        let registry = DirectiveRegistry::from_yaml(
            "directives:\n  - name: transition\n    scope: local\n    description: Slide transition.\n    providedBy: marp-cli\n",
        )
        .unwrap();
        let resolution = registry.lookup_scoped("_transition", COMMENT).unwrap();
        assert!(resolution.scoped);
        assert_eq!(resolution.definition.provided_by, Provider::MarpCli);
    }

    #[test]
    fn config_duplicate_of_builtin_is_rejected() {
        let err = DirectiveRegistry::from_json(
            r#"{"directives": [{"name": "theme", "scope": "global", "description": "Mine."}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Registry(RegistryError::DuplicateName(ref name)) if name == "theme"
        ));
    }

    #[test]
    fn malformed_config_is_reported() {
        assert!(matches!(
            DirectiveRegistry::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn completions_include_scoped_forms_for_locals_only() {
        let registry = DirectiveRegistry::builtin();
        let keys = registry.completions(COMMENT);
        assert!(keys.contains(&"paginate".to_string()));
        assert!(keys.contains(&"_paginate".to_string()));
        assert!(keys.contains(&"theme".to_string()));
        assert!(!keys.contains(&"_theme".to_string()));
        assert_eq!(keys.len(), 22 + 10);
    }
}
