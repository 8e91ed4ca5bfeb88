use std::collections::HashMap;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Request payload failed field validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field_errors: HashMap<String, String>,
}

/// Collects per-field problems before failing a request as a whole
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| message.into());
    }

    /// Required string field: present and not blank.
    pub fn require(&mut self, field: &str, value: Option<&str>) {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => self.add(field, format!("{} should not be empty", field)),
        }
    }

    /// Optional string field: absent is fine, blank is not.
    pub fn non_blank(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if v.trim().is_empty() {
                self.add(field, format!("{} should not be empty", field));
            }
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if let Err(msg) = validate_email_format(value) {
            self.add(field, msg);
        }
    }

    pub fn password(&mut self, field: &str, value: &str) {
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            self.add(
                field,
                format!("{} must be at least {} characters", field, MIN_PASSWORD_LENGTH),
            );
        }
    }

    pub fn finish(self, message: &str) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                message: message.to_string(),
                field_errors: self.errors,
            })
        }
    }
}

pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    if !parts[1].contains('.') || parts[1].starts_with('.') || parts[1].ends_with('.') {
        return Err("Invalid email format".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
