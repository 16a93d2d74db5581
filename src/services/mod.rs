// Services module - business logic layer

pub mod catalog_service;
pub mod defaults;
pub mod intake_service;
pub mod pricing_service;

pub use catalog_service::CatalogService;
pub use intake_service::IntakeService;
pub use pricing_service::{price_selection, round_currency, PricingService};
