use thiserror::Error;

/// Errors raised while building a directive registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A definition with the same name is already registered.
    #[error("Directive `{0}` is already registered")]
    DuplicateName(String),
    /// A definition without a name.
    #[error("Directive name must not be empty")]
    EmptyName,
    /// A definition without a description.
    #[error("Directive `{0}` has an empty description")]
    MissingDescription(String),
}

/// Errors raised while loading registry configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON config failed to parse.
    #[error("Registry config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML config failed to parse.
    #[error("Registry config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Config parsed, but a definition was rejected.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised by batch scanning.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Dedicated thread pool could not be created.
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
