//! Typed market records handed to the engine by the dataset loader.

pub mod competitor;
pub mod concept;
pub mod history;
pub mod metric;
pub mod product;
pub mod trend;

use crate::errors::DomainError;

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::invalid_field(field, format!("must be a finite number, got {value}")))
    }
}

pub(crate) fn ensure_percentage(field: &str, value: f64) -> Result<(), DomainError> {
    ensure_finite(field, value)?;
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::invalid_field(field, format!("must be within 0..=100, got {value}")))
    }
}

pub(crate) fn ensure_not_blank(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::invalid_field(field, "must not be blank"))
    } else {
        Ok(())
    }
}
