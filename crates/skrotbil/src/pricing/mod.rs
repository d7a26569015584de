//! Tenant pricing administration: distance-deduction rules, promotional
//! bonus offers, the per-tenant pricing dials, and the valuation engine that
//! combines them into a quoted price delta for a vehicle.

pub mod cache;
pub mod domain;
pub mod offers;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;
pub mod settings;
pub mod valuation;

#[cfg(test)]
mod tests;

pub use cache::SettingsCache;
pub use domain::{
    BonusOffer, Collection, DistanceRule, DistanceRuleDraft, FuelType, OfferId, PartsDeclaration,
    QuoteRequest, RuleId, VehicleProfile,
};
pub use offers::active_offers;
pub use repository::{PricingRepository, RepositoryError};
pub use router::pricing_router;
pub use rules::{matching_rule, validate_rule, RuleViolation};
pub use service::{PricingService, PricingServiceError};
pub use settings::{PricingSettings, SettingsError};
pub use valuation::{QuoteComponent, QuoteOutcome, ValuationEngine, ValuationFactor};
