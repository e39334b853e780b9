//! Master password validation.
//!
//! Checks a candidate master password against shape rules before it is ever
//! sent to the daemon. Outcomes are plain data, not errors: rule violations
//! land on the `password` field, while overall success carries a separate
//! form-level message. The two channels are distinct so a renderer can show
//! inline field errors and a banner independently.

use std::fmt;

/// Field name the validator attaches errors to.
pub const PASSWORD_FIELD: &str = "password";

/// Substring rejected outright, beyond the basic schema rules.
pub const FORBIDDEN_SEQUENCE: &str = "1234";

/// Message attached to the field when the forbidden sequence is present.
pub const WEAK_PASSWORD_MESSAGE: &str = "Not a good password.";

/// Form-level message reported on success.
pub const VALID_MESSAGE: &str = "Valid data!";

/// Declarative shape rules for the master password.
///
/// Swappable without touching the validator: stricter deployments construct
/// the validator with their own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRules {
    /// Minimum length in characters, applied after trimming
    pub min_len: usize,
    /// Whether surrounding whitespace is stripped before the checks
    pub trim: bool,
}

impl Default for SchemaRules {
    fn default() -> Self {
        Self {
            min_len: 5,
            trim: true,
        }
    }
}

/// A candidate master password, held only for validation and submission.
///
/// Never persisted; `Debug` redacts the contents so the value cannot leak
/// through logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordCandidate {
    pub password: String,
}

impl PasswordCandidate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl fmt::Debug for PasswordCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCandidate")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A rule violation attached to a specific form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of a validation run.
///
/// Field errors and the form-level message are independent channels; a
/// successful run has no field errors and carries [`VALID_MESSAGE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub field_errors: Vec<FieldError>,
    pub message: Option<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Messages attached to one field, in rule order.
    pub fn errors_for(&self, field: &str) -> Vec<&str> {
        self.field_errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }
}

/// Validates candidate master passwords against [`SchemaRules`].
///
/// Pure decision logic: no daemon calls, no persistence, no state beyond
/// the rules it was built with.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterPasswordValidator {
    rules: SchemaRules,
}

impl MasterPasswordValidator {
    /// Validator with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: SchemaRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> SchemaRules {
        self.rules
    }

    /// Check a candidate against every rule, accumulating violations.
    ///
    /// Both the length rule and the forbidden-sequence rule are evaluated;
    /// a candidate can fail both at once. Length counts characters, not
    /// bytes.
    pub fn validate(&self, candidate: &PasswordCandidate) -> Validation {
        let checked: &str = if self.rules.trim {
            candidate.password.trim()
        } else {
            &candidate.password
        };

        let mut outcome = Validation::default();
        if checked.chars().count() < self.rules.min_len {
            outcome.field_errors.push(FieldError {
                field: PASSWORD_FIELD,
                message: format!("Must be at least {} characters.", self.rules.min_len),
            });
        }
        if checked.contains(FORBIDDEN_SEQUENCE) {
            outcome.field_errors.push(FieldError {
                field: PASSWORD_FIELD,
                message: WEAK_PASSWORD_MESSAGE.to_string(),
            });
        }
        if outcome.is_valid() {
            outcome.message = Some(VALID_MESSAGE.to_string());
        }
        outcome
    }
}

/// State binding between a password input and the validator.
///
/// Tracks what the user typed and the outcome of the last submission, the
/// way a form-rendering layer expects: editing invalidates the previous
/// outcome, submitting re-validates.
#[derive(Debug, Clone, Default)]
pub struct MasterPasswordForm {
    validator: MasterPasswordValidator,
    candidate: PasswordCandidate,
    outcome: Option<Validation>,
}

impl MasterPasswordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: SchemaRules) -> Self {
        Self {
            validator: MasterPasswordValidator::with_rules(rules),
            candidate: PasswordCandidate::default(),
            outcome: None,
        }
    }

    /// Update the typed password, discarding any previous outcome.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.candidate.password = value.into();
        self.outcome = None;
    }

    pub fn password(&self) -> &str {
        &self.candidate.password
    }

    /// Validate the current candidate and record the outcome.
    pub fn submit(&mut self) -> &Validation {
        let outcome = self.validator.validate(&self.candidate);
        self.outcome.insert(outcome)
    }

    /// Field errors from the last submission (empty before any submission).
    pub fn errors(&self) -> &[FieldError] {
        self.outcome
            .as_ref()
            .map(|v| v.field_errors.as_slice())
            .unwrap_or(&[])
    }

    /// Form-level message from the last submission.
    pub fn message(&self) -> Option<&str> {
        self.outcome.as_ref().and_then(|v| v.message.as_deref())
    }

    /// Whether the last submission passed every rule.
    pub fn is_valid(&self) -> bool {
        self.outcome.as_ref().is_some_and(|v| v.is_valid())
    }

    /// Hand over the candidate for submission to the daemon, leaving the
    /// form empty so the password does not linger here.
    pub fn take_candidate(&mut self) -> PasswordCandidate {
        self.outcome = None;
        std::mem::take(&mut self.candidate)
    }
}
