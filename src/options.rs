//! Options controlling how Tizen files are written.

/// File name used when a caller writes a single file without naming it.
pub const DEFAULT_FILE_NAME: &str = "strings.xml";

/// Write behavior options for [`crate::formats::TizenFormatter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TizenOptions {
    /// Generator identity placed in the header comment of every written file.
    pub generator: String,
    /// Default output file name for single-file writes.
    pub file_name: String,
}

impl Default for TizenOptions {
    fn default() -> Self {
        Self {
            generator: format!("Generated by tizencodec {}", env!("CARGO_PKG_VERSION")),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl TizenOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generator identity.
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Sets the default output file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}
