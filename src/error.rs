//! All error types for the tizencodec crate.
//!
//! These are returned from all fallible operations (reading, writing, configuration, etc.).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to generate any files: no languages found at {}", .0.display())]
    NoLanguagesWritten(PathBuf),

    #[error("failed to read any files: no languages found at {}", .0.display())]
    NoLanguagesFound(PathBuf),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("languages `{first}` and `{second}` both map to {}", .file.display())]
    LanguageCollision {
        file: PathBuf,
        first: String,
        second: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_unknown_format_error() {
        let error = Error::UnknownFormat("android".to_string());
        assert_eq!(error.to_string(), "unknown format `android`");
    }

    #[test]
    fn test_directory_not_found_names_directory() {
        let error = Error::DirectoryNotFound(Path::new("out/res").to_path_buf());
        assert_eq!(error.to_string(), "directory does not exist: out/res");
    }

    #[test]
    fn test_no_languages_written_names_directory() {
        let error = Error::NoLanguagesWritten(Path::new("out/res").to_path_buf());
        assert!(error.to_string().contains("failed to generate any files"));
        assert!(error.to_string().contains("out/res"));
    }

    #[test]
    fn test_no_languages_found_names_directory() {
        let error = Error::NoLanguagesFound(Path::new("in/res").to_path_buf());
        assert!(error.to_string().contains("failed to read any files"));
        assert!(error.to_string().contains("in/res"));
    }

    #[test]
    fn test_language_collision_names_both_languages() {
        let error = Error::LanguageCollision {
            file: Path::new("out/eng-GB.xml").to_path_buf(),
            first: "eng-GB".to_string(),
            second: "en".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "languages `eng-GB` and `en` both map to out/eng-GB.xml"
        );
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_config_error() {
        let error = Error::config_error("bad table");
        assert_eq!(error.to_string(), "invalid configuration: bad table");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownLanguage("xx-YY".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownLanguage"));
        assert!(debug.contains("xx-YY"));
    }
}
