use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::models::{
    CalcLineItem, CalcRequest, CalcResult, PackageEntry, ServiceEntry, PROMO_FACTOR, PROMO_LABEL,
    PROMO_SESSIONS,
};
use crate::observability::Metrics;
use crate::services::CatalogService;

/// Price calculator backed by the live catalog
pub struct PricingService {
    catalog: Arc<CatalogService>,
    metrics: Option<Arc<Metrics>>,
}

impl PricingService {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self {
            catalog,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Price a selection against one catalog snapshot
    #[instrument(skip(self, request), fields(codes = request.selected_codes.len(), sessions = request.sessions))]
    pub async fn calculate(&self, request: &CalcRequest) -> CalcResult {
        let (services, packages) = tokio::join!(
            self.catalog.resolve_services(),
            self.catalog.resolve_packages()
        );

        let result = price_selection(&services, &packages, &request.selected_codes, request.sessions);

        crate::info_with_trace!(
            items = result.items.len(),
            subtotal = %result.subtotal,
            total = %result.total,
            promo = result.has_promo(),
            "Price calculated"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_price_calculation(result.has_promo());
        }

        result
    }
}

/// Currency rounding: two decimals, halves away from zero
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Resolve each code (service first, then the first package with that code), sum the
/// matched prices and apply the 6+2 promotion when exactly eight sessions are booked.
/// Unknown codes are dropped; duplicates are priced once per occurrence.
pub fn price_selection(
    services: &[ServiceEntry],
    packages: &[PackageEntry],
    selected_codes: &[String],
    sessions: i64,
) -> CalcResult {
    let services_by_code: HashMap<&str, &ServiceEntry> = services
        .iter()
        .map(|service| (service.code.as_str(), service))
        .collect();

    let matched = selected_codes.iter().filter_map(|code| {
        if let Some(service) = services_by_code.get(code.as_str()) {
            return Some(CalcLineItem {
                code: code.clone(),
                name: service.name.clone(),
                price: service.price_single,
                is_package: false,
            });
        }
        packages
            .iter()
            .find(|package| package.code == *code)
            .map(|package| CalcLineItem {
                code: code.clone(),
                name: package.title.clone(),
                price: package.price_single,
                is_package: true,
            })
    });

    // An item whose price no longer fits in the running sum is left out, so the
    // subtotal always equals the sum of the returned items.
    let mut items = Vec::with_capacity(selected_codes.len());
    let mut sum = Decimal::ZERO;
    for item in matched {
        match sum.checked_add(item.price) {
            Some(next) => {
                sum = next;
                items.push(item);
            }
            None => warn!(code = %item.code, price = %item.price, "Dropping line item, subtotal overflow"),
        }
    }
    let subtotal = round_currency(sum);

    let (promo_label, total) = if sessions == PROMO_SESSIONS {
        let discounted = match subtotal.checked_mul(PROMO_FACTOR) {
            Some(discounted) => round_currency(discounted),
            None => {
                warn!(subtotal = %subtotal, "Promo discount overflowed, charging subtotal");
                subtotal
            }
        };
        (Some(PROMO_LABEL.to_string()), discounted)
    } else {
        (None, subtotal)
    };

    CalcResult {
        items,
        subtotal,
        promo_label,
        total,
    }
}
