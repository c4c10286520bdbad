//! Contact and custom-design forms.
//!
//! Only the submission rules live here. Delivery is simulated by the
//! storefront session, which acknowledges accepted forms after a delay.

use serde::{Deserialize, Serialize};

use crate::checkout::{is_valid_email, INVALID_EMAIL_MESSAGE};
use crate::CommerceError;

pub const CONTACT_MISSING_FIELDS: &str = "Please fill in all fields.";
pub const CONTACT_SENDING: &str = "Sending message...";
pub const CONTACT_SENT: &str = "Thank you for your message! We will get back to you soon.";

pub const DESIGN_MISSING_FIELDS: &str =
    "Please fill in all required fields and upload your design.";
pub const DESIGN_FILE_TOO_LARGE: &str =
    "File is too large (max 5MB). Please choose a smaller image.";
pub const DESIGN_PROCESSING: &str = "Processing your design request...";
pub const DESIGN_SENT: &str = "Your design request has been sent! We will contact you via email soon.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), CommerceError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(CommerceError::Validation(CONTACT_MISSING_FIELDS.to_string()));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(CommerceError::Validation(INVALID_EMAIL_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Metadata of the uploaded artwork. The bytes never reach this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignFile {
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub item_type: String,
    pub quantity: i64,
    #[serde(default)]
    pub notes: String,
    pub email: String,
    pub file: Option<DesignFile>,
}

impl DesignRequest {
    /// Check required fields and the upload size limit.
    ///
    /// Notes are optional. The size check runs first because the upload
    /// field rejects an oversized file as soon as it is picked.
    pub fn validate(&self, max_file_bytes: u64) -> Result<(), CommerceError> {
        if let Some(file) = &self.file {
            if file.size_bytes > max_file_bytes {
                return Err(CommerceError::Validation(DESIGN_FILE_TOO_LARGE.to_string()));
            }
        }

        let missing = self.item_type.trim().is_empty()
            || self.quantity < 1
            || self.email.trim().is_empty()
            || self.file.as_ref().map_or(true, |f| f.name.trim().is_empty());
        if missing {
            return Err(CommerceError::Validation(DESIGN_MISSING_FIELDS.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u64 = 5 * 1024 * 1024;

    fn contact() -> ContactForm {
        ContactForm {
            name: "Ana".to_string(),
            email: "ana@example.ph".to_string(),
            subject: "Bulk order".to_string(),
            message: "Do you print tote bags?".to_string(),
        }
    }

    fn design() -> DesignRequest {
        DesignRequest {
            item_type: "t-shirt".to_string(),
            quantity: 20,
            notes: String::new(),
            email: "ana@example.ph".to_string(),
            file: Some(DesignFile {
                name: "logo.png".to_string(),
                size_bytes: 250_000,
            }),
        }
    }

    #[test]
    fn test_contact_ok() {
        assert!(contact().validate().is_ok());
    }

    #[test]
    fn test_contact_missing_field() {
        let form = ContactForm {
            subject: String::new(),
            ..contact()
        };
        assert_eq!(form.validate().unwrap_err().to_string(), CONTACT_MISSING_FIELDS);
    }

    #[test]
    fn test_contact_bad_email() {
        let form = ContactForm {
            email: "ana@example".to_string(),
            ..contact()
        };
        assert_eq!(form.validate().unwrap_err().to_string(), INVALID_EMAIL_MESSAGE);
    }

    #[test]
    fn test_design_ok_without_notes() {
        assert!(design().validate(MAX).is_ok());
    }

    #[test]
    fn test_design_requires_file() {
        let form = DesignRequest {
            file: None,
            ..design()
        };
        assert_eq!(form.validate(MAX).unwrap_err().to_string(), DESIGN_MISSING_FIELDS);
    }

    #[test]
    fn test_design_requires_quantity() {
        let form = DesignRequest {
            quantity: 0,
            ..design()
        };
        assert!(form.validate(MAX).is_err());
    }

    #[test]
    fn test_design_size_limit() {
        let mut form = design();
        form.file = Some(DesignFile {
            name: "huge.tiff".to_string(),
            size_bytes: MAX,
        });
        assert!(form.validate(MAX).is_ok());

        form.file = Some(DesignFile {
            name: "huge.tiff".to_string(),
            size_bytes: MAX + 1,
        });
        assert_eq!(form.validate(MAX).unwrap_err().to_string(), DESIGN_FILE_TOO_LARGE);
    }
}
