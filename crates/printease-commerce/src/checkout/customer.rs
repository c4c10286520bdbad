//! Customer details collected at checkout.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::CommerceError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Loose shape check: something, an `@`, something, a dot, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub const MISSING_DETAILS_MESSAGE: &str = "Please fill in all required fields.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Who the order is for and where it goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDetails {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.full_name.trim(),
            self.email.trim(),
            self.phone.trim(),
            self.address.trim(),
        )
    }

    /// Require every field and a plausible email.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let fields = [&self.full_name, &self.email, &self.phone, &self.address];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(CommerceError::Validation(MISSING_DETAILS_MESSAGE.to_string()));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(CommerceError::Validation(INVALID_EMAIL_MESSAGE.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn juan() -> CustomerDetails {
        CustomerDetails::new("Juan Dela Cruz", "juan@example.ph", "09171234567", "Quezon City")
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.com"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("has space@example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_complete_details_pass() {
        assert!(juan().validate().is_ok());
    }

    #[test]
    fn test_blank_field_fails() {
        let details = CustomerDetails {
            phone: "   ".to_string(),
            ..juan()
        };
        let err = details.validate().unwrap_err();
        assert_eq!(err.to_string(), MISSING_DETAILS_MESSAGE);
    }

    #[test]
    fn test_bad_email_fails() {
        let details = CustomerDetails {
            email: "juan-at-example".to_string(),
            ..juan()
        };
        assert_eq!(details.validate().unwrap_err().to_string(), INVALID_EMAIL_MESSAGE);
    }

    #[test]
    fn test_trimmed() {
        let details = CustomerDetails::new(" Juan ", " juan@example.ph", "0917 ", "\tQC");
        let trimmed = details.trimmed();
        assert_eq!(trimmed.full_name, "Juan");
        assert_eq!(trimmed.phone, "0917");
        assert_eq!(trimmed.address, "QC");
    }
}
