//! Conversion of domain validation failures into request errors.

use serde_json::json;

use crate::domain::{
    ArticleValidationError, CommentValidationError, Error, ProductValidationError,
};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    EmptyField,
    NegativeValue,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::NegativeValue => "negative_value",
        }
    }
}

fn field_error(field: &str, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

impl From<ArticleValidationError> for Error {
    fn from(err: ArticleValidationError) -> Self {
        field_error(err.field(), ValidationCode::EmptyField, err.to_string())
    }
}

impl From<CommentValidationError> for Error {
    fn from(err: CommentValidationError) -> Self {
        field_error(err.field(), ValidationCode::EmptyField, err.to_string())
    }
}

impl From<ProductValidationError> for Error {
    fn from(err: ProductValidationError) -> Self {
        match err {
            ProductValidationError::EmptyTag { index } => {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": err.field(),
                    "index": index,
                    "code": ValidationCode::EmptyField.as_str(),
                }))
            }
            ProductValidationError::NegativePrice { .. } => {
                field_error(err.field(), ValidationCode::NegativeValue, err.to_string())
            }
            ProductValidationError::EmptyName | ProductValidationError::EmptyDescription => {
                field_error(err.field(), ValidationCode::EmptyField, err.to_string())
            }
        }
    }
}
