use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use super::{
    BookingRequest, FaqEntry, InquiryRequest, PackageEntry, ServiceEntry, SpecialEntry,
    ValidationError, ValidationResult,
};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MIN_DURATION_MINUTES: i64 = 5;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_PHONE_LENGTH: usize = 40;
pub const MAX_SUBJECT_LENGTH: usize = 200;
pub const MAX_MESSAGE_LENGTH: usize = 5000;
pub const MAX_NOTES_LENGTH: usize = 2000;
pub const MAX_SELECTED_CODES: usize = 50;
/// Upper bound for any catalog price (EUR 1,000,000.00)
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

impl Validate for ServiceEntry {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_required("code", &self.code)?;
        validate_price("price_single", &self.price_single)?;
        if let Some(price) = &self.price_package_6x {
            validate_price("price_package_6x", price)?;
        }
        validate_duration(self.duration_min)?;
        Ok(())
    }
}

impl Validate for PackageEntry {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("title", &self.title)?;
        validate_required("code", &self.code)?;
        validate_price("price_single", &self.price_single)?;
        Ok(())
    }
}

/// Blank questions or answers are rejected even though any string deserializes
impl Validate for FaqEntry {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("question", &self.question)?;
        validate_required("answer", &self.answer)?;
        Ok(())
    }
}

impl Validate for SpecialEntry {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("title", &self.title)?;
        validate_required("code", &self.code)?;
        if let Some(price) = &self.price {
            validate_price("price", price)?;
        }
        if let Some(old_price) = &self.old_price {
            validate_price("old_price", old_price)?;
        }
        if let Some(ends_at) = &self.ends_at {
            validate_iso_date("ends_at", ends_at)?;
        }
        Ok(())
    }
}

impl Validate for BookingRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_max_length("name", &self.name, MAX_NAME_LENGTH)?;
        validate_email(&self.email)?;
        validate_required("phone", &self.phone)?;
        validate_max_length("phone", &self.phone, MAX_PHONE_LENGTH)?;
        validate_iso_date("date", &self.date)?;
        validate_clock_time("time", &self.time)?;
        if self.selected_codes.len() > MAX_SELECTED_CODES {
            return Err(ValidationError::InvalidValue {
                field: "selected_codes".to_string(),
                value: self.selected_codes.len().to_string(),
                reason: format!("At most {} codes can be selected", MAX_SELECTED_CODES),
            });
        }
        if let Some(notes) = &self.notes {
            validate_max_length("notes", notes, MAX_NOTES_LENGTH)?;
        }
        Ok(())
    }
}

impl Validate for InquiryRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_max_length("name", &self.name, MAX_NAME_LENGTH)?;
        validate_email(&self.email)?;
        if let Some(phone) = &self.phone {
            validate_max_length("phone", phone, MAX_PHONE_LENGTH)?;
        }
        validate_required("subject", &self.subject)?;
        validate_max_length("subject", &self.subject, MAX_SUBJECT_LENGTH)?;
        validate_required("message", &self.message)?;
        validate_max_length("message", &self.message, MAX_MESSAGE_LENGTH)?;
        Ok(())
    }
}

/// Reject empty or whitespace-only strings
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub fn validate_max_length(field: &str, value: &str, max_length: usize) -> ValidationResult<()> {
    let actual_length = value.chars().count();
    if actual_length > max_length {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length,
            actual_length,
        });
    }
    Ok(())
}

/// Prices may be zero but never negative, and never above `MAX_PRICE`
pub fn validate_price(field: &str, price: &Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::BelowMinimum {
            field: field.to_string(),
            min: "0".to_string(),
            value: price.to_string(),
        });
    }
    if *price > MAX_PRICE {
        return Err(ValidationError::AboveMaximum {
            field: field.to_string(),
            max: MAX_PRICE.to_string(),
            value: price.to_string(),
        });
    }
    Ok(())
}

pub fn validate_duration(duration_min: i64) -> ValidationResult<()> {
    if duration_min < MIN_DURATION_MINUTES {
        return Err(ValidationError::BelowMinimum {
            field: "duration_min".to_string(),
            min: MIN_DURATION_MINUTES.to_string(),
            value: duration_min.to_string(),
        });
    }
    Ok(())
}

/// Basic structural email check: `local@domain.tld`, no whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        expected: "name@domain.tld".to_string(),
    };

    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

pub fn validate_iso_date(field: &str, value: &str) -> ValidationResult<()> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            expected: "YYYY-MM-DD".to_string(),
        })
}

pub fn validate_clock_time(field: &str, value: &str) -> ValidationResult<()> {
    let trimmed = value.trim();
    // chrono accepts single-digit hours for %H, the form always sends two
    if trimmed.len() != 5 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            expected: "HH:MM".to_string(),
        });
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            expected: "HH:MM".to_string(),
        })
}
