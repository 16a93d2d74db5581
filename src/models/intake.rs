use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BookingType;

/// Appointment request submitted from the booking form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// HH:MM
    pub time: String,
    #[serde(default)]
    pub selected_codes: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Message submitted from the contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Acknowledgement returned after a document was stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub id: String,
}

impl CreatedResponse {
    pub fn new(id: String) -> Self {
        Self { ok: true, id }
    }
}

impl BookingRequest {
    /// Fill in the submission time unless the client supplied one
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.created_at.get_or_insert(now);
        self
    }
}

impl InquiryRequest {
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.created_at.get_or_insert(now);
        self
    }
}
