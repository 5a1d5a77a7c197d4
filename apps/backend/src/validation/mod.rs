//! Credential validation for sign-up and login payloads.
//!
//! Checks run over the raw JSON object so every violation can be reported,
//! not just the first deserialization error. The client-facing message is
//! the first violation, suffixed with "(and N more errors)" when there are
//! more.

pub mod rules;

use std::fmt;

use sea_orm::ConnectionTrait;
use serde_json::{Map, Value};

use crate::config::PasswordPolicy;
use crate::error::AppError;
use crate::infra::db_errors::EMAIL_TAKEN_MESSAGE;
use crate::repos::users;

/// Named rule sets; one per endpoint that accepts credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    SignUp,
    Login,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

/// Every violation found in one payload, in field then rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn message(&self) -> String {
        let Some(first) = self.violations.first() else {
            return "The given data was invalid.".to_string();
        };
        match self.violations.len() - 1 {
            0 => first.message.clone(),
            1 => format!("{} (and 1 more error)", first.message),
            n => format!("{} (and {n} more errors)", first.message),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::invalid(failure.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Normalized record produced by a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated {
    SignUp(SignUpInput),
    Login(LoginInput),
}

/// Apply `rule_set` to `payload`. Store-backed rules are not included;
/// see [`validate_sign_up_with_store`].
pub fn validate(
    payload: &Value,
    rule_set: RuleSet,
    policy: &PasswordPolicy,
) -> Result<Validated, ValidationFailure> {
    match rule_set {
        RuleSet::SignUp => validate_sign_up(payload, policy).map(Validated::SignUp),
        RuleSet::Login => validate_login(payload).map(Validated::Login),
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationFailure> {
    payload.as_object().ok_or_else(|| ValidationFailure {
        violations: vec![FieldViolation::new(
            "body",
            "object",
            "The request body must be a JSON object.",
        )],
    })
}

struct SignUpChecks {
    name: rules::Checked,
    email: rules::Checked,
    password: rules::Checked,
}

impl SignUpChecks {
    fn run(fields: &Map<String, Value>, policy: &PasswordPolicy) -> Self {
        Self {
            name: rules::name(fields.get("name")),
            email: rules::email(fields.get("email")),
            password: rules::password(fields.get("password"), policy),
        }
    }

    /// Email that passed its syntactic rules, ready for the uniqueness query.
    fn email_for_lookup(&self) -> Option<&str> {
        if self.email.violations.is_empty() {
            self.email.value.as_deref()
        } else {
            None
        }
    }

    fn finish(self) -> Result<SignUpInput, ValidationFailure> {
        let violations: Vec<_> = [&self.name, &self.email, &self.password]
            .into_iter()
            .flat_map(|c| c.violations.iter().cloned())
            .collect();
        match (self.name.value, self.email.value, self.password.value) {
            (Some(name), Some(email), Some(password)) if violations.is_empty() => {
                Ok(SignUpInput {
                    name,
                    email,
                    password,
                })
            }
            _ => Err(ValidationFailure { violations }),
        }
    }
}

pub fn validate_sign_up(
    payload: &Value,
    policy: &PasswordPolicy,
) -> Result<SignUpInput, ValidationFailure> {
    SignUpChecks::run(as_object(payload)?, policy).finish()
}

/// Sign-up rules including "email not already registered".
///
/// The lookup only runs once the email is well formed. The unique index
/// still has the final say when two sign-ups race.
pub async fn validate_sign_up_with_store<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    payload: &Value,
    policy: &PasswordPolicy,
) -> Result<SignUpInput, AppError> {
    let mut checks = SignUpChecks::run(as_object(payload)?, policy);
    if let Some(email) = checks.email_for_lookup() {
        if users::email_exists(conn, email).await? {
            checks
                .email
                .violations
                .push(FieldViolation::new("email", "unique", EMAIL_TAKEN_MESSAGE));
        }
    }
    Ok(checks.finish()?)
}

pub fn validate_login(payload: &Value) -> Result<LoginInput, ValidationFailure> {
    let fields = as_object(payload)?;
    let email = rules::email(fields.get("email"));
    let password = rules::password_present(fields.get("password"));

    let violations: Vec<_> = email
        .violations
        .iter()
        .chain(password.violations.iter())
        .cloned()
        .collect();
    match (email.value, password.value) {
        (Some(email), Some(password)) if violations.is_empty() => {
            Ok(LoginInput { email, password })
        }
        _ => Err(ValidationFailure { violations }),
    }
}
