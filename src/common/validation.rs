// src/common/validation.rs

use validator::ValidationError;

// ---
// Validações customizadas compartilhadas pelos payloads
// ---

fn digits_exact(value: &str, expected: usize) -> Result<(), ValidationError> {
    if value.len() != expected || !value.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("digits");
        err.add_param("digits".into(), &expected);
        err.message = Some(format!("The field must be {expected} digits.").into());
        return Err(err);
    }
    Ok(())
}

/// Telefones peruanos: exatamente 9 dígitos numéricos.
pub fn digits_9(value: &str) -> Result<(), ValidationError> {
    digits_exact(value, 9)
}

/// IMEI: exatamente 15 dígitos numéricos.
pub fn digits_15(value: &str) -> Result<(), ValidationError> {
    digits_exact(value, 15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_digit_strings() {
        assert!(digits_9("906393152").is_ok());
        assert!(digits_15("012345678912345").is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(digits_9("12345678").is_err());
        assert!(digits_9("1234567890").is_err());
        assert!(digits_15("0123456789").is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(digits_9("90639315a").is_err());
        assert!(digits_9("9063 3152").is_err());
    }
}
