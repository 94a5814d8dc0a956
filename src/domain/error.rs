//! Domain error types.

/// A clause-level parse error with the character offset inside the clause.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let column = input
            .char_indices()
            .take_while(|(i, _)| *i < self.position)
            .count();
        let caret = " ".repeat(column) + "^";
        format!(
            "{input}\n{caret}\n{err}",
            input = input,
            caret = caret,
            err = self
        )
    }
}

/// Top-level error type for stockscreen.
///
/// The query parser and filter engine never produce these; they surface only
/// from configuration, record loading and the CLI/web shells.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("cannot read stock data from {path}: {reason}")]
    DataSource { path: String, reason: String },

    #[error("malformed stock data: {reason}")]
    DataFormat { reason: String },

    #[error("no valid conditions found")]
    NoValidConditions,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. } => 2,
            ScreenerError::DataSource { .. } | ScreenerError::DataFormat { .. } => 3,
            ScreenerError::NoValidConditions => 4,
        };
        std::process::ExitCode::from(code)
    }
}
