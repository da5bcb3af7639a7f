use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Fatal conditions that abort the current declaration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Unsupported {kind} construct: {text}")]
    UnsupportedConstruct { kind: String, text: String },

    #[error("Malformed struct tag {tag:?}: {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("Type expression nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

impl CompileError {
    pub fn unsupported(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            kind: kind.into(),
            text: text.into(),
        }
    }

    pub fn malformed_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}
