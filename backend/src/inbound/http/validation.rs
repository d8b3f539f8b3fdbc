//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns a ready-to-send `invalid_request` [`Error`] whose
//! details name the offending field and a machine-readable code.

use serde_json::json;

use crate::domain::{
    CredentialsValidationError, Error, ImageValidationError, NoStepsError, RecipeId,
    RecipeValidationError, UserId,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidRecipeId,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidRecipeId => "invalid_recipe_id",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::InvalidValue)
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, value)
    })
}

pub(crate) fn parse_recipe_id(value: &str, field: FieldName) -> Result<RecipeId, Error> {
    value.trim().parse::<i64>().map(RecipeId::new).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be an integer"))
            .with_value(ErrorCode::InvalidRecipeId, value)
    })
}

pub(crate) fn map_recipe_validation_error(err: RecipeValidationError) -> Error {
    let field = match err {
        RecipeValidationError::EmptyTitle => FieldName::new("title"),
        RecipeValidationError::NoTags | RecipeValidationError::EmptyTag => {
            FieldName::new("recipe_tags")
        }
    };
    invalid_field_error(field, err.to_string())
}

pub(crate) fn map_image_validation_error(err: ImageValidationError) -> Error {
    invalid_field_error(FieldName::new("image"), err.to_string())
}

pub(crate) fn map_steps_error(err: NoStepsError) -> Error {
    invalid_field_error(FieldName::new("steps"), err.to_string())
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::EmptyUsername => FieldName::new("username"),
        CredentialsValidationError::EmptyEmail => FieldName::new("email"),
        CredentialsValidationError::EmptyPassword => FieldName::new("password"),
        CredentialsValidationError::PasswordMismatch => FieldName::new("confirmPassword"),
    };
    invalid_field_error(field, err.to_string())
}
