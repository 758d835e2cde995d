//! Field-level constraint checking shared by every event kind.
//!
//! A [`FieldValidator`] is parameterized by the event kind it is building
//! so every failure identifies the kind, the field, and the offending raw
//! value. Raw label text is parsed and checked in one step; the returned
//! value is the validated, normalized form.

use crate::error::ValidationError;

/// Inclusive canonical x range; the negative allowance covers in-goal and
/// touch overflow from the tracking tool.
pub const X_RANGE: (f64, f64) = (-10.0, 150.0);

/// Inclusive canonical y range.
pub const Y_RANGE: (f64, f64) = (-10.0, 80.0);

/// Rule checker bound to one event kind for error context.
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator {
    event_kind: &'static str,
}

impl FieldValidator {
    pub fn new(event_kind: &'static str) -> Self {
        Self { event_kind }
    }

    fn fail(&self, field: &'static str, message: impl Into<String>, value: &str) -> ValidationError {
        ValidationError::new(self.event_kind, field, message, value)
    }

    /// Parse a numeric field from raw label text.
    pub fn number(&self, field: &'static str, raw: &str) -> Result<f64, ValidationError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| self.fail(field, "must be a number", raw))
    }

    /// Canonical x coordinate, already transformed.
    pub fn x_coordinate(&self, field: &'static str, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() || value < X_RANGE.0 || value > X_RANGE.1 {
            return Err(self.fail(
                field,
                format!("must be between {} and {}", X_RANGE.0, X_RANGE.1),
                &value.to_string(),
            ));
        }
        Ok(value)
    }

    /// Canonical y coordinate, already transformed.
    pub fn y_coordinate(&self, field: &'static str, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() || value < Y_RANGE.0 || value > Y_RANGE.1 {
            return Err(self.fail(
                field,
                format!("must be between {} and {}", Y_RANGE.0, Y_RANGE.1),
                &value.to_string(),
            ));
        }
        Ok(value)
    }

    /// Trimmed, non-empty string.
    pub fn non_empty_string(&self, field: &'static str, raw: &str) -> Result<String, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(self.fail(field, "must be a non-empty string", raw));
        }
        Ok(trimmed.to_string())
    }

    /// Numeric amount (distance, meters, points); never negative.
    pub fn non_negative_number(&self, field: &'static str, raw: &str) -> Result<f64, ValidationError> {
        let value = self.number(field, raw)?;
        if value < 0.0 {
            return Err(self.fail(field, "must be a non-negative number", raw));
        }
        Ok(value)
    }

    /// Strict boolean: "true"/"false" after trim, case-insensitive. A
    /// truthy proxy like "1" or "yes" is a failure, not a coercion.
    pub fn boolean(&self, field: &'static str, raw: &str) -> Result<bool, ValidationError> {
        match raw.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.fail(field, "must be true or false", raw)),
        }
    }

    /// Closed-set membership, case-insensitive after trim. The failure
    /// message lists the allowed set in sorted order so operators can
    /// spot near-miss spellings.
    pub fn enumeration(
        &self,
        field: &'static str,
        raw: &str,
        allowed: &[&str],
    ) -> Result<String, ValidationError> {
        let cleaned = raw.trim().to_lowercase();
        if cleaned.is_empty() {
            return Err(self.fail(field, "must be a non-empty string", raw));
        }
        if !allowed.iter().any(|a| *a == cleaned) {
            let mut sorted: Vec<&str> = allowed.to_vec();
            sorted.sort_unstable();
            return Err(self.fail(
                field,
                format!("must be one of: {}", sorted.join(", ")),
                raw,
            ));
        }
        Ok(cleaned)
    }
}
