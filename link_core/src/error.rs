//! Error types for link operations.

/// Errors surfaced by link queries and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// A lookup expected an overlapping link annotation and found none.
    #[error("no link annotation overlaps {start}..{end}")]
    NotFound { start: usize, end: usize },
    #[error("range {start}..{end} lies outside the buffer (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("inverted range {start}..{end}")]
    InvertedRange { start: usize, end: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LinkError::NotFound { start: 3, end: 7 }.to_string(),
            "no link annotation overlaps 3..7"
        );
        assert_eq!(
            LinkError::OutOfBounds { start: 2, end: 9, len: 5 }.to_string(),
            "range 2..9 lies outside the buffer (length 5)"
        );
    }
}
