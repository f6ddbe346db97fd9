//! Engine error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error types organized by layer/domain
///
/// None of these are fatal to the host: the engine logs them and degrades
/// (placeholder field, skipped form) instead of aborting. Validation failures
/// are not errors at all and travel through the submit callback.
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Descriptor/Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Field '{field}' is missing mandatory key '{key}'")]
    MissingKey { field: String, key: String },

    #[error("Unknown entry type '{entry_type}' for field '{field}'")]
    UnknownEntryType { field: String, entry_type: String },

    #[error("Unknown field type '{field_type}' for field '{field}'")]
    UnknownFieldType { field: String, field_type: String },

    #[error("Form instance '{key}' already exists")]
    DuplicateInstance { key: String },

    #[error("Form instance '{key}' does not exist")]
    UnknownInstance { key: String },

    #[error("Container element not found: #{id}")]
    ContainerNotFound { id: String },

    #[error("A form engine is already attached to this page")]
    AlreadyInitialized,

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Rendering Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to render field '{field}': {message}")]
    Render { field: String, message: String },

    #[error("UI node not found: {0}")]
    NodeNotFound(String),

    // ─────────────────────────────────────────────────────────────
    // Repeating Group Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Maximum of {limit} entries reached")]
    ListLimit { limit: usize },

    #[error("List field '{field}' has no entry #{counter}")]
    ListItemNotFound { field: String, counter: u32 },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn missing_key(field: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            field: field.into(),
            key: key.into(),
        }
    }

    pub fn unknown_field_type(field: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self::UnknownFieldType {
            field: field.into(),
            field_type: field_type.into(),
        }
    }

    pub fn duplicate_instance(key: impl Into<String>) -> Self {
        Self::DuplicateInstance { key: key.into() }
    }

    pub fn unknown_instance(key: impl Into<String>) -> Self {
        Self::UnknownInstance { key: key.into() }
    }

    pub fn container_not_found(id: impl Into<String>) -> Self {
        Self::ContainerNotFound { id: id.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn render(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn node_not_found(what: impl Into<String>) -> Self {
        Self::NodeNotFound(what.into())
    }

    /// Check if this error stems from a bad descriptor or engine setup
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::MissingKey { .. }
                | Error::UnknownEntryType { .. }
                | Error::UnknownFieldType { .. }
                | Error::DuplicateInstance { .. }
                | Error::UnknownInstance { .. }
                | Error::ContainerNotFound { .. }
                | Error::AlreadyInitialized
                | Error::Config { .. }
        )
    }

    /// Check if the surrounding form build can carry on after this error
    ///
    /// Everything except a broken page guard degrades to a placeholder or a
    /// logged no-op.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::AlreadyInitialized)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::missing_key("email", "name");
        assert_eq!(
            err.to_string(),
            "Field 'email' is missing mandatory key 'name'"
        );

        let err = Error::duplicate_instance("default");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_is_config_error() {
        assert!(Error::unknown_field_type("f", "slider").is_config_error());
        assert!(Error::container_not_found("app").is_config_error());
        assert!(Error::AlreadyInitialized.is_config_error());
        assert!(Error::config("bad theme table").is_config_error());
        assert!(!Error::render("f", "boom").is_config_error());
        assert!(!Error::ListLimit { limit: 3 }.is_config_error());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::render("f", "boom").is_recoverable());
        assert!(Error::duplicate_instance("default").is_recoverable());
        assert!(!Error::AlreadyInitialized.is_recoverable());
    }

    #[test]
    fn test_list_limit_message() {
        let err = Error::ListLimit { limit: 2 };
        assert_eq!(err.to_string(), "Maximum of 2 entries reached");
    }

    #[test]
    fn test_result_ext_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "nope",
        ));
        let err = res.context("reading settings").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
