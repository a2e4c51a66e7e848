//! Non-blank text values shared by the entity constructors.

/// Raised when a required text field is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("text must not be blank")]
pub struct TextError;

/// Text that contains at least one non-whitespace character.
///
/// The original value is kept as submitted; only blankness is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    /// Validate `value`.
    pub fn new(value: impl Into<String>) -> Result<Self, TextError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TextError);
        }
        Ok(Self(value))
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take the text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" \t\n")]
    fn blank_values_are_rejected(#[case] raw: &str) {
        assert_eq!(RequiredText::new(raw), Err(TextError));
    }

    #[rstest]
    fn surrounding_whitespace_is_preserved() {
        let text = RequiredText::new(" hi ").expect("non-blank");
        assert_eq!(text.as_str(), " hi ");
    }
}
