/// Error types for matrix construction, text parsing and flip configuration

/// Convenience result type used across flipbook-core.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the matrix arithmetic itself.
///
/// Composition and projection never fail; degenerate geometry shows up as
/// non-finite numbers instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A raw value sequence was neither a 2D (6) nor a 3D (16) matrix.
    #[error("expected 6 or 16 matrix values, got {0}")]
    Length(usize),

    /// Text is not a `matrix(...)` or `matrix3d(...)` declaration.
    #[error("invalid transform declaration: {0:?}")]
    Parse(String),

    /// Page flip configuration rejected.
    #[error("invalid flip configuration: {0}")]
    Config(String),
}

impl Error {
    /// Build an [`Error::Parse`] value.
    pub fn parse(input: impl Into<String>) -> Self {
        Self::Parse(input.into())
    }

    /// Build an [`Error::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::Length(4).to_string(),
            "expected 6 or 16 matrix values, got 4"
        );
        assert_eq!(
            Error::parse("rotate(1deg)").to_string(),
            "invalid transform declaration: \"rotate(1deg)\""
        );
        assert_eq!(
            Error::config("polygons must be at least 1").to_string(),
            "invalid flip configuration: polygons must be at least 1"
        );
    }
}
