use std::path::PathBuf;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the generator.
///
/// Only storage writes and content generation terminate a run. Image and
/// topic-synthesis failures are recovered where they happen and surface as
/// degraded outcomes on the run report instead.
#[derive(Debug, Error)]
pub enum GeneratorError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Storage (history file, post files, images) ──────────────────────
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    // ── Model / image generation ────────────────────────────────────────
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("OpenAI API key not set. Set OPENAI_API_KEY or add ai.api_key to the config.")]
    MissingApiKey,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Storage errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn read(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Read {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

// ─── Generation errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("content generation failed: {0}")]
    Content(String),

    #[error("image generation failed: {0}")]
    Image(String),

    #[error("image download failed: {0}")]
    ImageDownload(String),

    #[error("topic synthesis failed: {0}")]
    TopicSynthesis(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = GeneratorError::Config(ConfigError::Validation("website is empty".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn storage_write_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = GeneratorError::from(StorageError::write("/tmp/posts/a.md", io));
        let text = err.to_string();
        assert!(text.contains("/tmp/posts/a.md"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn config_load_and_parse_carry_path() {
        let load = ConfigError::Load {
            path: PathBuf::from("site/blog-generator.toml"),
            message: "not found".into(),
        };
        assert_eq!(
            load.to_string(),
            "failed to load config site/blog-generator.toml: not found"
        );
        let read = StorageError::read("topic-history.json", "expected array");
        assert_eq!(
            read.to_string(),
            "failed to read topic-history.json: expected array"
        );
    }

    #[test]
    fn content_error_displays_message() {
        let err = GeneratorError::Generation(GenerationError::Content("HTTP 500".into()));
        assert!(err.to_string().contains("content generation failed: HTTP 500"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: GeneratorError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }

    #[test]
    fn missing_api_key_mentions_env_var() {
        let err = GeneratorError::Config(ConfigError::MissingApiKey);
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
