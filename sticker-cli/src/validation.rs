//! Asset field validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use sticker_engine::payload::{AssetFields, Field};

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .unwrap()
});
static RE_CODE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12}$").unwrap());

/// A single field problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Email Office Activation must be an email address")]
    InvalidEmail,

    #[error("Code Number must be exactly 12 digits")]
    InvalidCodeNumber,
}

/// Every problem found in a set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Check every primary field is present (after trimming), the email looks
/// like an email, and the code number is 12 digits.
pub fn validate_fields(fields: &AssetFields) -> Result<(), FieldErrors> {
    let mut errors = Vec::new();

    for field in Field::ORDER.into_iter().filter(|f| !f.is_optional()) {
        if fields.value(field).is_empty() {
            errors.push(FieldError::Required(field.label()));
        }
    }

    let email = fields.value(Field::EmailOfficeActivation);
    if !email.is_empty() && !RE_EMAIL.is_match(email) {
        errors.push(FieldError::InvalidEmail);
    }

    let code = fields.value(Field::CodeNumber);
    if !code.is_empty() && !RE_CODE_NUMBER.is_match(code) {
        errors.push(FieldError::InvalidCodeNumber);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FieldErrors(errors))
    }
}
