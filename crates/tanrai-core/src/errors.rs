//! Validation errors for incoming todo bodies.

use thiserror::Error;

use crate::todo::MAX_TEXT_LEN;

/// Reasons a create or update body is rejected before touching the store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `text` was missing, `null`, or empty on create.
    #[error("Todo text is required")]
    TextRequired,
    /// `text` exceeds the column bound.
    #[error("Todo text must be at most {max} characters", max = MAX_TEXT_LEN)]
    TextTooLong {
        /// Character count of the rejected text.
        len: usize,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_required_display() {
        assert_eq!(ValidationError::TextRequired.to_string(), "Todo text is required");
    }

    #[test]
    fn text_too_long_display() {
        let err = ValidationError::TextTooLong { len: 300 };
        assert_eq!(err.to_string(), "Todo text must be at most 255 characters");
    }
}
