use laserstudio_api::models::{
    CatalogRecord, PackageEntry, RawRecord, ServiceEntry, PROMO_LABEL, PROMO_SESSIONS,
};
use laserstudio_api::repositories::InMemoryDocumentRepository;
use laserstudio_api::services::defaults::{default_packages, default_services};
use laserstudio_api::services::{price_selection, round_currency, CatalogService};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;

// Property-based test strategies
prop_compose! {
    fn arb_price()(cents in 0u32..500_000) -> Decimal {
        Decimal::from_parts(cents, 0, 0, false, 2)
    }
}

prop_compose! {
    fn arb_fine_price()(units in 0u32..50_000_000) -> Decimal {
        // Sub-cent precision exercises rounding
        Decimal::from_parts(units, 0, 0, false, 5)
    }
}

prop_compose! {
    fn arb_service(code: String)(
        name in "[A-Za-z ]{3,30}",
        category in "[A-Za-z]{3,15}",
        price_single in arb_fine_price(),
        duration_min in 5i64..240,
    ) -> ServiceEntry {
        ServiceEntry {
            name,
            category,
            code: code.clone(),
            price_single,
            price_package_6x: None,
            duration_min,
        }
    }
}

fn arb_catalog() -> impl Strategy<Value = Vec<ServiceEntry>> {
    (1usize..12).prop_flat_map(|size| {
        (0..size)
            .map(|i| arb_service(format!("SVC-{}", i)))
            .collect::<Vec<_>>()
    })
}

fn arb_known_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("OKS".to_string()),
        Just("BIK-K".to_string()),
        Just("BEN-HELE".to_string()),
        Just("GEZ-LIP".to_string()),
        Just("FB-STD".to_string()),
        Just("FB-LUX".to_string()),
    ]
}

fn default_price(code: &str) -> Option<Decimal> {
    default_services()
        .iter()
        .find(|service| service.code == code)
        .map(|service| service.price_single)
        .or_else(|| {
            default_packages()
                .iter()
                .find(|package| package.code == code)
                .map(|package| package.price_single)
        })
}

proptest! {
    #[test]
    fn test_subtotal_is_exact_sum_in_input_order(
        codes in prop::collection::vec(arb_known_code(), 0..20),
        sessions in 1i64..8,
    ) {
        let result = price_selection(default_services(), default_packages(), &codes, sessions);

        let item_codes: Vec<&String> = result.items.iter().map(|item| &item.code).collect();
        prop_assert_eq!(item_codes, codes.iter().collect::<Vec<_>>());

        let expected: Decimal = codes.iter().filter_map(|code| default_price(code)).sum();
        prop_assert_eq!(result.subtotal, expected);
        prop_assert_eq!(result.total, result.subtotal);
        prop_assert!(result.promo_label.is_none());
    }

    #[test]
    fn test_unknown_codes_never_produce_items(
        codes in prop::collection::vec("__[a-z]{1,10}__", 0..10),
        sessions in any::<i64>(),
    ) {
        let result = price_selection(default_services(), default_packages(), &codes, sessions);
        prop_assert!(result.items.is_empty());
        prop_assert_eq!(result.subtotal, Decimal::ZERO);
        prop_assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_promo_only_at_exactly_eight_sessions(
        codes in prop::collection::vec(arb_known_code(), 1..10),
        sessions in any::<i64>(),
    ) {
        let result = price_selection(default_services(), default_packages(), &codes, sessions);

        if sessions == PROMO_SESSIONS {
            prop_assert_eq!(result.promo_label.as_deref(), Some(PROMO_LABEL));
            prop_assert_eq!(result.total, round_currency(result.subtotal * Decimal::new(75, 2)));
            prop_assert!(result.total <= result.subtotal);
        } else {
            prop_assert!(result.promo_label.is_none());
            prop_assert_eq!(result.total, result.subtotal);
        }
    }

    #[test]
    fn test_monetary_outputs_have_two_decimals(
        services in arb_catalog(),
        picks in prop::collection::vec(0usize..12, 0..30),
        promo in any::<bool>(),
    ) {
        let codes: Vec<String> = picks
            .iter()
            .filter(|&&i| i < services.len())
            .map(|&i| services[i].code.clone())
            .collect();
        let sessions = if promo { PROMO_SESSIONS } else { 1 };

        let result = price_selection(&services, &[], &codes, sessions);

        prop_assert!(result.subtotal.scale() <= 2);
        prop_assert!(result.total.scale() <= 2);
        prop_assert!(result.subtotal >= Decimal::ZERO);

        // Accumulation order does not change the rounded subtotal
        let mut reversed = codes.clone();
        reversed.reverse();
        let reversed_result = price_selection(&services, &[], &reversed, sessions);
        prop_assert_eq!(result.subtotal, reversed_result.subtotal);
        prop_assert_eq!(result.total, reversed_result.total);
    }

    #[test]
    fn test_duplicates_are_priced_per_occurrence(
        price in arb_price(),
        count in 0usize..16,
    ) {
        let service = ServiceEntry {
            name: "Oksels".to_string(),
            category: "Oksels".to_string(),
            code: "OKS".to_string(),
            price_single: price,
            price_package_6x: None,
            duration_min: 15,
        };
        let codes = vec!["OKS".to_string(); count];

        let result = price_selection(&[service], &[], &codes, 1);
        prop_assert_eq!(result.items.len(), count);
        prop_assert_eq!(result.subtotal, price * Decimal::from(count as u64));
    }

    #[test]
    fn test_projection_drops_unknown_keys(
        extra_keys in prop::collection::vec("[a-z_]{1,12}", 0..8),
        price in arb_price(),
    ) {
        let mut record: RawRecord = json!({
            "title": "Full body",
            "code": "FB-STD",
            "included_codes": ["OKS"],
            "price_single": price.to_string().parse::<f64>().unwrap(),
        })
        .as_object()
        .cloned()
        .unwrap();
        for key in extra_keys.iter().filter(|key| !PackageEntry::FIELDS.contains(&key.as_str())) {
            record.insert(key.clone(), Value::String("metadata".to_string()));
        }

        let package = PackageEntry::from_record(&record);
        prop_assert!(package.is_ok());
        prop_assert_eq!(package.unwrap().code, "FB-STD");
    }
}

#[test]
fn test_fallback_is_identical_across_calls() {
    let catalog = CatalogService::new(Arc::new(InMemoryDocumentRepository::unavailable()));

    let first = tokio_test::block_on(catalog.resolve_services());
    let second = tokio_test::block_on(catalog.resolve_services());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.as_slice(), default_services());
}
