use std::path::PathBuf;

/// Result alias for fallible promptbox operations.
pub type Result<T> = std::result::Result<T, PromptBoxError>;

/// Errors raised by the ambient layers (configuration, clipboard, logging).
///
/// Catalog mutations never fail; a missing record is a silent no-op, so
/// nothing in here describes the record store.
#[derive(Debug, thiserror::Error)]
pub enum PromptBoxError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown model '{0}' (expected GPT-4, Claude or Gemini)")]
    UnknownModel(String),

    #[error("no clipboard tool available (tried {tried})")]
    ClipboardUnavailable { tried: String },

    #[error("clipboard command '{command}' failed: {source}")]
    ClipboardIo {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard command '{command}' exited with {status}")]
    ClipboardStatus { command: String, status: String },

    #[error("clipboard worker has shut down")]
    ClipboardClosed,

    #[error("failed to set up logging: {0}")]
    Logging(String),
}
