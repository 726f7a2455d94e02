use crate::errors::ServiceError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const EMPTY_TEXT_MESSAGE: &str = "Text input cannot be empty";

/// Request body accepted by the analysis routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextInput {
    /// Text to analyze. Must contain at least one non-whitespace character.
    pub text: String,
}

/// Unicode whitespace plus the ASCII separators U+001C..=U+001F, which also
/// count as blank for request validation.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn validate_text(text: &str) -> Result<(), ServiceError> {
    if text.chars().all(is_blank_char) {
        return Err(ServiceError::InvalidInput(EMPTY_TEXT_MESSAGE.to_string()));
    }
    Ok(())
}
