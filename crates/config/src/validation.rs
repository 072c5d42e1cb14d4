//! Validation system for configuration values
//!
//! Each config section implements [`ConfigSection`], so a new section only
//! needs its own `validate`/`merge` to take part in loading and saving.

pub use crate::error::ValidationError;

/// A section of the configuration file
pub trait ConfigSection: Default {
    /// Validates the section, returning every problem found
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Merges another section into this one; values from `other` win
    fn merge(&mut self, other: Self);

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is an absolute `http` or `https` URI
    pub fn http_uri(value: &str, field: &str) -> Result<(), ValidationError> {
        Self::not_empty(value, field)?;

        let rest = value
            .strip_prefix("http://")
            .or_else(|| value.strip_prefix("https://"));
        match rest {
            Some(host) if !host.is_empty() && !value.contains(char::is_whitespace) => Ok(()),
            _ => Err(ValidationError::with_value(
                field,
                "must be an http(s) URI",
                value,
            )),
        }
    }

    /// Validates that no value appears twice
    pub fn unique(values: &[String], field: &str) -> Result<(), ValidationError> {
        for (i, value) in values.iter().enumerate() {
            if values[..i].contains(value) {
                return Err(ValidationError::with_value(
                    field,
                    "contains a duplicate entry",
                    value,
                ));
            }
        }
        Ok(())
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
