//! Inbound frame validation.

use skillswap_core::error::AppError;

/// Validates a raw inbound frame before parsing.
pub fn validate_frame(raw: &str, max_bytes: usize) -> Result<(), AppError> {
    if raw.len() > max_bytes {
        return Err(AppError::validation(format!(
            "Frame exceeds maximum size of {max_bytes} bytes"
        )));
    }

    if raw.trim().is_empty() {
        return Err(AppError::validation("Empty frame"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_frame_rejected() {
        let raw = "x".repeat(100);
        assert!(validate_frame(&raw, 64).is_err());
        assert!(validate_frame(&raw, 100).is_ok());
    }

    #[test]
    fn test_blank_frame_rejected() {
        assert!(validate_frame("   ", 1024).is_err());
    }
}
