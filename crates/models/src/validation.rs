//! Field checks shared by the vehicle and work entities.

use crate::errors::ModelError;

/// Required text column: non-blank and at most `max` characters.
pub fn require_text(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

/// Present-but-blank text counts as absent in partial updates.
pub fn present_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Present-but-zero numbers count as absent in partial updates.
pub fn present_int(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_blank_and_long() {
        assert!(require_text("brand", "Volvo", 50).is_ok());
        assert!(require_text("brand", "   ", 50).is_err());
        assert!(require_text("brand", &"x".repeat(51), 50).is_err());
        // multi-byte characters count once each
        assert!(require_text("brand", &"é".repeat(50), 50).is_ok());
    }

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(present_text(Some("")), None);
        assert_eq!(present_text(Some("  ")), None);
        assert_eq!(present_text(Some("Audi")), Some("Audi"));
        assert_eq!(present_text(None), None);
        assert_eq!(present_int(Some(0)), None);
        assert_eq!(present_int(Some(2019)), Some(2019));
    }
}
