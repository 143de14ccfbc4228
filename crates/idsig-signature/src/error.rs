use idsig_mangle::MangleError;
use thiserror::Error;

/// Errors raised while building, looking up or parsing signatures.
///
/// Apart from [`SignatureError::Parse`], every variant is an internal
/// compiler error: the driver is expected to abort the compilation with the
/// rendered declaration attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error(transparent)]
    Mangle(#[from] MangleError),

    #[error("expected an exported declaration: {rendered}")]
    NotExported { rendered: String },

    #[error("expected a file-local declaration: {rendered}")]
    UnexpectedlyExported { rendered: String },

    #[error("malformed signature `{input}`: {reason}")]
    Parse { input: String, reason: String },
}

impl SignatureError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
