//! Built-in catalog served when the store is empty or unreachable.
//!
//! Built once on first use and never mutated afterwards.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{FaqEntry, PackageEntry, ServiceEntry};

static DEFAULT_SERVICES: Lazy<Vec<ServiceEntry>> = Lazy::new(|| {
    vec![
        service("Oksels", "Oksels", "OKS", dec!(39), 15),
        service("Bikinilijn klein", "Bikinilijn", "BIK-K", dec!(49), 20),
        service("Bikinilijn groot", "Bikinilijn", "BIK-G", dec!(69), 25),
        service("Onderbenen", "Benen", "BEN-OND", dec!(79), 30),
        service("Bovenbenen", "Benen", "BEN-BOV", dec!(89), 35),
        service("Hele benen", "Benen", "BEN-HELE", dec!(129), 55),
        service("Bovenlip", "Gezicht", "GEZ-LIP", dec!(29), 10),
        service("Kin", "Gezicht", "GEZ-KIN", dec!(29), 10),
        service("Gehele gelaat", "Gezicht", "GEZ-FULL", dec!(79), 35),
        service("Onderarmen", "Armen", "ARM-OND", dec!(59), 25),
        service("Hele armen", "Armen", "ARM-HELE", dec!(89), 35),
    ]
});

static DEFAULT_PACKAGES: Lazy<Vec<PackageEntry>> = Lazy::new(|| {
    vec![
        PackageEntry {
            title: "Full body".to_string(),
            description: Some(
                "Hele armen + oksels + buik + hele benen + bikinilijn klein".to_string(),
            ),
            code: "FB-STD".to_string(),
            included_codes: codes(&["ARM-HELE", "OKS", "BEN-HELE", "BIK-K"]),
            price_single: dec!(279),
            promo_6_plus_2: true,
        },
        PackageEntry {
            title: "Full body + gelaat".to_string(),
            description: Some("Full body met gehele gelaat als luxere variant".to_string()),
            code: "FB-LUX".to_string(),
            included_codes: codes(&["ARM-HELE", "OKS", "BEN-HELE", "BIK-K", "GEZ-FULL"]),
            price_single: dec!(329),
            promo_6_plus_2: true,
        },
    ]
});

static DEFAULT_FAQS: Lazy<Vec<FaqEntry>> = Lazy::new(|| {
    vec![
        faq(
            "Doet laserontharing pijn?",
            "De meeste klanten ervaren slechts milde prikkels. Met koeling is het goed te doen.",
        ),
        faq(
            "Hoeveel behandelingen heb ik nodig?",
            "Gemiddeld 6-8 sessies voor optimaal resultaat; daarom onze 6 + 2 deal.",
        ),
        faq(
            "Voor wie is het geschikt?",
            "De nieuwste technologie werkt voor de meeste huid- en haartypen. Tijdens de intake adviseren we persoonlijk.",
        ),
        faq(
            "Voorzorg / nazorg?",
            "Vermijd zonnen 48 uur voor en na. Gebruik SPF en volg ons nazorgadvies.",
        ),
    ]
});

pub fn default_services() -> &'static [ServiceEntry] {
    &DEFAULT_SERVICES
}

pub fn default_packages() -> &'static [PackageEntry] {
    &DEFAULT_PACKAGES
}

pub fn default_faqs() -> &'static [FaqEntry] {
    &DEFAULT_FAQS
}

fn service(
    name: &str,
    category: &str,
    code: &str,
    price_single: Decimal,
    duration_min: i64,
) -> ServiceEntry {
    ServiceEntry {
        name: name.to_string(),
        category: category.to_string(),
        code: code.to_string(),
        price_single,
        price_package_6x: None,
        duration_min,
    }
}

fn faq(question: &str, answer: &str) -> FaqEntry {
    FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

fn codes(values: &[&str]) -> Vec<String> {
    values.iter().map(|code| code.to_string()).collect()
}
