//! Per-field checks. Each returns every violation it finds for one field,
//! in rule order.

use lazy_regex::regex_is_match;
use serde_json::Value;

use super::FieldViolation;
use crate::config::PasswordPolicy;

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 30;
pub const EMAIL_MAX: usize = 255;

/// Outcome of checking one field: the normalized value when it passed
/// `required` and type checks, plus whatever else went wrong.
pub(super) struct Checked {
    pub value: Option<String>,
    pub violations: Vec<FieldViolation>,
}

impl Checked {
    fn failed(violation: FieldViolation) -> Self {
        Self {
            value: None,
            violations: vec![violation],
        }
    }
}

fn required(field: &'static str) -> FieldViolation {
    FieldViolation::new(field, "required", format!("The {field} field is required."))
}

fn not_a_string(field: &'static str) -> FieldViolation {
    FieldViolation::new(field, "string", format!("The {field} field must be a string."))
}

/// Resolve a raw JSON value to a string, applying `required`.
///
/// Missing, null, and blank strings fail `required`; no other rule runs
/// for them. `trim` controls normalization of the returned value.
fn string_field(
    field: &'static str,
    raw: Option<&Value>,
    trim: bool,
    type_violation: fn(&'static str) -> FieldViolation,
) -> Result<String, FieldViolation> {
    match raw {
        None | Some(Value::Null) => Err(required(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(required(field)),
        Some(Value::String(s)) if trim => Ok(s.trim().to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(type_violation(field)),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    regex_is_match!(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
        email
    )
}

pub(super) fn name(raw: Option<&Value>) -> Checked {
    const FIELD: &str = "name";
    let value = match string_field(FIELD, raw, true, not_a_string) {
        Ok(v) => v,
        Err(v) => return Checked::failed(v),
    };

    let mut violations = Vec::new();
    let len = value.chars().count();
    if len < NAME_MIN {
        violations.push(FieldViolation::new(
            FIELD,
            "min",
            format!("The {FIELD} field must be at least {NAME_MIN} characters."),
        ));
    }
    if len > NAME_MAX {
        violations.push(FieldViolation::new(
            FIELD,
            "max",
            format!("The {FIELD} field must not be greater than {NAME_MAX} characters."),
        ));
    }
    Checked {
        value: Some(value),
        violations,
    }
}

pub(super) fn email(raw: Option<&Value>) -> Checked {
    const FIELD: &str = "email";
    fn invalid(field: &'static str) -> FieldViolation {
        FieldViolation::new(
            field,
            "email",
            format!("The {field} field must be a valid email address."),
        )
    }

    let value = match string_field(FIELD, raw, true, invalid) {
        Ok(v) => v,
        Err(v) => return Checked::failed(v),
    };

    let mut violations = Vec::new();
    if !is_valid_email(&value) {
        violations.push(invalid(FIELD));
    }
    if value.chars().count() > EMAIL_MAX {
        violations.push(FieldViolation::new(
            FIELD,
            "max",
            format!("The {FIELD} field must not be greater than {EMAIL_MAX} characters."),
        ));
    }
    Checked {
        value: Some(value),
        violations,
    }
}

/// Password presence and type only. Never trimmed.
pub(super) fn password_present(raw: Option<&Value>) -> Checked {
    match string_field("password", raw, false, not_a_string) {
        Ok(v) => Checked {
            value: Some(v),
            violations: Vec::new(),
        },
        Err(v) => Checked::failed(v),
    }
}

fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_control()
}

/// Presence plus every rule of `policy`.
pub(super) fn password(raw: Option<&Value>, policy: &PasswordPolicy) -> Checked {
    const FIELD: &str = "password";
    let mut checked = password_present(raw);
    let Some(value) = checked.value.as_deref() else {
        return checked;
    };

    if value.chars().count() < policy.min_length {
        checked.violations.push(FieldViolation::new(
            FIELD,
            "min",
            format!(
                "The {FIELD} field must be at least {} characters.",
                policy.min_length
            ),
        ));
    }
    if policy.require_mixed_case
        && !(value.chars().any(char::is_uppercase) && value.chars().any(char::is_lowercase))
    {
        checked.violations.push(FieldViolation::new(
            FIELD,
            "mixed",
            format!("The {FIELD} field must contain at least one uppercase and one lowercase letter."),
        ));
    }
    if policy.require_numbers && !value.chars().any(char::is_numeric) {
        checked.violations.push(FieldViolation::new(
            FIELD,
            "numbers",
            format!("The {FIELD} field must contain at least one number."),
        ));
    }
    if policy.require_symbols && !value.chars().any(is_symbol) {
        checked.violations.push(FieldViolation::new(
            FIELD,
            "symbols",
            format!("The {FIELD} field must contain at least one symbol."),
        ));
    }
    checked
}
