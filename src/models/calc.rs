use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label attached to a calculation when the 6+2 promotion applies
pub const PROMO_LABEL: &str = "6 + 2 gratis";

/// Session count that triggers the promotion. Exact match, not a threshold.
pub const PROMO_SESSIONS: i64 = 8;

/// Share of the subtotal charged under the promotion (6 of 8 sessions)
pub const PROMO_FACTOR: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Request body for the price calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcRequest {
    pub selected_codes: Vec<String>,
    #[serde(default = "default_sessions")]
    pub sessions: i64,
}

fn default_sessions() -> i64 {
    1
}

/// One priced entry in a calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcLineItem {
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_package: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResult {
    pub items: Vec<CalcLineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub promo_label: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl CalcResult {
    pub fn has_promo(&self) -> bool {
        self.promo_label.is_some()
    }
}
