use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document collections known to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Service,
    Package,
    Faq,
    Special,
    Booking,
    Inquiry,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Service,
        Collection::Package,
        Collection::Faq,
        Collection::Special,
        Collection::Booking,
        Collection::Inquiry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Service => "service",
            Collection::Package => "package",
            Collection::Faq => "faq",
            Collection::Special => "special",
            Collection::Booking => "booking",
            Collection::Inquiry => "inquiry",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service" => Ok(Collection::Service),
            "package" => Ok(Collection::Package),
            "faq" => Ok(Collection::Faq),
            "special" => Ok(Collection::Special),
            "booking" => Ok(Collection::Booking),
            "inquiry" => Ok(Collection::Inquiry),
            _ => Err(format!("Invalid collection: {}", s)),
        }
    }
}

/// Kind of appointment a client can book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Intake,
    Behandeling,
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingType::Intake => write!(f, "intake"),
            BookingType::Behandeling => write!(f, "behandeling"),
        }
    }
}

/// Where a resolved catalog snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Store,
    Defaults,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Store => write!(f, "store"),
            CatalogSource::Defaults => write!(f, "defaults"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_display_and_parse() {
        for collection in Collection::ALL {
            let parsed: Collection = collection.to_string().parse().unwrap();
            assert_eq!(parsed, collection);
        }
        assert_eq!(Collection::Inquiry.as_str(), "inquiry");
        assert!("bookings".parse::<Collection>().is_err());
        assert!("Service".parse::<Collection>().is_err());
    }

    #[test]
    fn test_booking_type_serde() {
        let json = serde_json::to_string(&BookingType::Behandeling).unwrap();
        assert_eq!(json, "\"behandeling\"");

        let parsed: BookingType = serde_json::from_str("\"intake\"").unwrap();
        assert_eq!(parsed, BookingType::Intake);
        assert!(serde_json::from_str::<BookingType>("\"consult\"").is_err());
    }
}
