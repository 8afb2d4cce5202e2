//! Input validation for grade report requests.
//!
//! Problems are collected per field so the front-end form can point at every
//! bad mark in a single response instead of failing on the first one.

use std::fmt;
use thiserror::Error;

use super::models::RawMark;

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Path of the field, e.g. `subjects[2].FA1`
    pub field: String,
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for a mark that is not a number
    pub fn non_numeric_mark(field: &str, value: &RawMark) -> Self {
        Self::new(field, format!("{} is not a number", value.describe()))
            .with_suggestion("Enter the mark as a number, e.g. 15 or 12.5")
    }

    /// Create error for a subject whose marks add up past the range of `f64`
    pub fn total_out_of_range(index: usize) -> Self {
        Self::new(
            format!("subjects[{}]", index),
            "FA1 + FA2 + SA is too large to total",
        )
        .with_suggestion("Check the marks for extra digits")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

/// Collection of field errors with formatted output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Ok if nothing was collected, otherwise the collection as an error.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidMarks(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation failed: {} invalid field(s)",
            self.errors.len()
        )?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

/// Errors returned by the report calculator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No subject data provided!")]
    NoSubjects,
    #[error("{0}")]
    InvalidMarks(FieldErrors),
}

/// Resolve a mark to a number, recording a field error when it is not one.
pub fn resolve_mark(
    mark: &RawMark,
    index: usize,
    label: &str,
    errors: &mut FieldErrors,
) -> f64 {
    match mark.as_number() {
        Some(value) => value,
        None => {
            let field = format!("subjects[{}].{}", index, label);
            errors.add(FieldError::non_numeric_mark(&field, mark));
            0.0
        }
    }
}
