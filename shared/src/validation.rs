//! Validation utilities for the Procurement Dashboard
//!
//! Includes Indonesia-specific validations for supplier tax and contact data.

// ============================================================================
// Supplier Registration Validations
// ============================================================================

/// Validate supplier name is present and within length bounds
pub fn validate_supplier_name(nama: &str) -> Result<(), &'static str> {
    let trimmed = nama.trim();
    if trimmed.is_empty() {
        return Err("Supplier name is required");
    }
    if trimmed.len() > 200 {
        return Err("Supplier name must be at most 200 characters");
    }
    Ok(())
}

/// Validate supplier code format (S-DN-NNNNN)
pub fn validate_supplier_code(code: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = code.split('-').collect();

    if parts.len() != 3 {
        return Err("Supplier code must be in format S-DN-NNNNN");
    }
    if parts[0] != "S" || parts[1] != "DN" {
        return Err("Supplier code must start with 'S-DN'");
    }
    // counters past 99999 keep their extra digits
    if parts[2].len() < 5 || !parts[2].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid sequence number in supplier code");
    }

    Ok(())
}

/// Validate the item-code list of a make-po request
pub fn validate_item_codes(item_codes: &[String]) -> Result<(), &'static str> {
    if item_codes.is_empty() {
        return Err("item_codes must not be empty");
    }
    if item_codes.iter().any(|c| c.trim().is_empty()) {
        return Err("item_codes must not contain blank entries");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

// ============================================================================
// Indonesia-Specific Validations
// ============================================================================

/// Validate NPWP (Nomor Pokok Wajib Pajak)
/// Accepts the classic 15-digit form (99.999.999.9-999.999) and the
/// 16-digit NIK-based form introduced in 2024
pub fn validate_npwp(npwp: &str) -> Result<(), &'static str> {
    let digits: String = npwp.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 15 && digits.len() != 16 {
        return Err("NPWP must be 15 or 16 digits");
    }

    Ok(())
}

/// Validate Indonesian phone number format
/// Accepts: 081234567890, 0812-3456-7890, +6281234567890
pub fn validate_indonesian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Domestic format: 10-13 digits starting with 0 (e.g., 081234567890)
    if (10..=13).contains(&digits.len()) && digits.starts_with('0') {
        return Ok(());
    }
    // Without the leading zero: 9-12 digits (e.g., 81234567890)
    if (9..=12).contains(&digits.len()) && !digits.starts_with('0') && !digits.starts_with("62") {
        return Ok(());
    }
    // International format with country code: 11-14 digits starting with 62
    if (11..=14).contains(&digits.len()) && digits.starts_with("62") {
        return Ok(());
    }

    Err("Invalid Indonesian phone number format")
}
