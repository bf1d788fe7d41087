use crate::diff::Side;
use crate::value::Kind;
use thiserror::Error;

/// Result type alias using DeepEqError
pub type Result<T> = std::result::Result<T, DeepEqError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match on
/// without depending on message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// One side of a comparison is an absent handle
    InvalidHandle,
    /// The value kind cannot be decomposed into a diff (function, channel)
    UnsupportedKind,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidHandle => "ERR_INVALID_HANDLE",
            ExErrorKind::UnsupportedKind => "ERR_UNSUPPORTED_KIND",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus the context that
/// was available when the error was raised.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<Side>,
    type_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            type_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the side of the comparison the error refers to
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Add the declared type of the offending value
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Failures raised by the difference engine and the reporting entry points
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeepEqError {
    /// A handle passed to a diffing call does not refer to a value
    #[error("{side} value is an absent handle")]
    InvalidHandle { side: Side },

    /// Functions and channels have no structure to decompose
    #[error("cannot diff values of {type_name}: {kind} values are not comparable")]
    UnsupportedKind { type_name: String, kind: Kind },
}

impl From<DeepEqError> for ExError {
    fn from(err: DeepEqError) -> Self {
        let message = err.to_string();
        match err {
            DeepEqError::InvalidHandle { side } => ExError::new(ExErrorKind::InvalidHandle)
                .with_side(side)
                .with_message(message),
            DeepEqError::UnsupportedKind { type_name, .. } => {
                ExError::new(ExErrorKind::UnsupportedKind)
                    .with_type_name(type_name)
                    .with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ExErrorKind::InvalidHandle.code(), "ERR_INVALID_HANDLE");
        assert_eq!(ExErrorKind::UnsupportedKind.code(), "ERR_UNSUPPORTED_KIND");
    }

    #[test]
    fn test_invalid_handle_conversion() {
        let err = DeepEqError::InvalidHandle { side: Side::Right };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::InvalidHandle);
        assert_eq!(ex.side(), Some(Side::Right));
        assert_eq!(ex.message(), "right value is an absent handle");
    }

    #[test]
    fn test_unsupported_kind_conversion_keeps_type() {
        let err = DeepEqError::UnsupportedKind {
            type_name: "fn()".to_string(),
            kind: Kind::Func,
        };
        let ex: ExError = err.into();
        assert_eq!(ex.code(), "ERR_UNSUPPORTED_KIND");
        assert_eq!(ex.type_name(), Some("fn()"));
    }

    #[test]
    fn test_display_includes_context() {
        let ex = ExError::new(ExErrorKind::InvalidHandle)
            .with_op("difference")
            .with_message("boom");
        let text = ex.to_string();
        assert!(text.contains("ERR_INVALID_HANDLE"));
        assert!(text.contains("in operation 'difference'"));
        assert!(text.contains(": boom"));
    }
}
