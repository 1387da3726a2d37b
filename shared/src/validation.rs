//! Validation utilities for the AgriDash platform

use crate::types::BoundaryPoint;

// ============================================================================
// Farm Validations
// ============================================================================

/// Validate a polygon boundary: at least three vertices, all within range
pub fn validate_boundary(boundary: &[BoundaryPoint]) -> Result<(), &'static str> {
    if boundary.len() < crate::geo::MIN_POLYGON_POINTS {
        return Err("Boundary needs at least 3 coordinate pairs");
    }
    for &[lng, lat] in boundary {
        if !(-180.0..=180.0).contains(&lng) {
            return Err("Longitude out of range");
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err("Latitude out of range");
        }
    }
    Ok(())
}

/// Validate a provider field identifier (non-empty, digits only)
pub fn validate_field_id(field_id: &str) -> Result<(), &'static str> {
    if field_id.is_empty() {
        return Err("Field ID cannot be empty");
    }
    if !field_id.chars().all(|c| c.is_ascii_digit()) {
        return Err("Field ID must be numeric");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate an Indian mobile number
/// Accepts: 9876543210, 98765-43210, +919876543210
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Indian mobile: 10 digits starting with 6-9
    if digits.len() == 10 && digits.starts_with(['6', '7', '8', '9']) {
        return Ok(());
    }
    // With country code: 91 + 10 digits
    if digits.len() == 12 && digits.starts_with("91") && digits[2..].starts_with(['6', '7', '8', '9'])
    {
        return Ok(());
    }
    Err("Invalid mobile number")
}

// ============================================================================
// Activity Validations
// ============================================================================

/// Validate a free-form activity type label
pub fn validate_activity_type(activity_type: &str) -> Result<(), &'static str> {
    if activity_type.trim().is_empty() {
        return Err("Activity type cannot be empty");
    }
    if activity_type.len() > 50 {
        return Err("Activity type must be at most 50 characters");
    }
    Ok(())
}

/// Validate an irrigation quantity in millimetres
pub fn validate_irrigation_quantity(quantity_mm: f64) -> Result<(), &'static str> {
    if !(0.0..=500.0).contains(&quantity_mm) {
        return Err("Irrigation quantity must be between 0 and 500 mm");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_boundary_valid() {
        let triangle = [[77.59, 12.97], [77.61, 12.97], [77.60, 12.99]];
        assert!(validate_boundary(&triangle).is_ok());
    }

    #[test]
    fn test_validate_boundary_too_short() {
        assert!(validate_boundary(&[]).is_err());
        assert!(validate_boundary(&[[77.59, 12.97], [77.61, 12.97]]).is_err());
    }

    #[test]
    fn test_validate_boundary_out_of_range() {
        assert!(validate_boundary(&[[181.0, 12.0], [77.0, 12.0], [77.0, 13.0]]).is_err());
        assert!(validate_boundary(&[[77.0, 91.0], [77.0, 12.0], [78.0, 13.0]]).is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("98765-43210").is_ok());
        assert!(validate_phone("+919876543210").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("1234567890").is_err()); // starts with 1
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_field_id() {
        assert!(validate_field_id("1752169888334").is_ok());
        assert!(validate_field_id("").is_err());
        assert!(validate_field_id("field-1").is_err());
    }

    #[test]
    fn test_validate_activity_type() {
        assert!(validate_activity_type("irrigation").is_ok());
        assert!(validate_activity_type("   ").is_err());
        assert!(validate_activity_type(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_irrigation_quantity() {
        assert!(validate_irrigation_quantity(25.0).is_ok());
        assert!(validate_irrigation_quantity(-1.0).is_err());
        assert!(validate_irrigation_quantity(900.0).is_err());
    }
}
