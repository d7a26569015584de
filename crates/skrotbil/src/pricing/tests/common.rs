use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::pricing::domain::{
    BonusOffer, Collection, DistanceRule, FuelType, OfferId, PartsDeclaration, QuoteRequest,
    RuleId, VehicleProfile,
};
use crate::pricing::repository::{PricingRepository, RepositoryError};
use crate::pricing::router::pricing_router;
use crate::pricing::service::PricingService;
use crate::pricing::settings::PricingSettings;
use crate::tenant::TenantId;

pub(super) fn tenant() -> TenantId {
    TenantId("yard-001".to_string())
}

pub(super) fn other_tenant() -> TenantId {
    TenantId("yard-002".to_string())
}

/// Settings used across the pricing tests: a 5000 SEK bonus for the 5-9.99
/// age bracket and a -500 SEK deduction for the 20-50 km pickup bracket.
pub(super) fn settings() -> PricingSettings {
    let mut settings = PricingSettings::standard();
    settings.age_bonuses.from_5_to_10 = 5000;
    settings.distance_adjustments.pickup_20_to_50 = -500;
    settings
}

pub(super) fn pickup_request(age_years: f64, model_year: i32, distance_km: f64) -> QuoteRequest {
    QuoteRequest {
        tenant_id: tenant(),
        vehicle: VehicleProfile {
            model_year,
            age_years,
            fuel: FuelType::Gasoline,
        },
        collection: Collection::Pickup { distance_km },
        parts: PartsDeclaration::default(),
    }
}

pub(super) fn dropoff_request(age_years: f64, model_year: i32, complete: bool) -> QuoteRequest {
    QuoteRequest {
        tenant_id: tenant(),
        vehicle: VehicleProfile {
            model_year,
            age_years,
            fuel: FuelType::Gasoline,
        },
        collection: Collection::DropOff { complete },
        parts: PartsDeclaration::default(),
    }
}

pub(super) fn rule(id: &str, min: f64, max: Option<f64>, deduction: i64) -> DistanceRule {
    DistanceRule {
        id: RuleId(id.to_string()),
        tenant_id: tenant(),
        min_distance_km: min,
        max_distance_km: max,
        deduction_sek: deduction,
    }
}

/// The three-tier rule table from the pricing documentation:
/// `[0,20) -> -250`, `[20,50) -> -500`, `[50,inf) -> -1000`.
pub(super) fn tiered_rules() -> Vec<DistanceRule> {
    vec![
        rule("rule-near", 0.0, Some(20.0), -250),
        rule("rule-mid", 20.0, Some(50.0), -500),
        rule("rule-far", 50.0, None, -1000),
    ]
}

pub(super) fn offer(id: &str, start: NaiveDate, end: NaiveDate, active: bool) -> BonusOffer {
    BonusOffer {
        id: OfferId(id.to_string()),
        tenant_id: tenant(),
        name: format!("Kampanj {id}"),
        amount_sek: 750,
        start_date: start,
        end_date: end,
        conditions: serde_json::json!({ "note": "registered owner only" }),
        is_active: active,
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[derive(Default)]
pub(super) struct MemoryState {
    pub(super) settings: HashMap<TenantId, PricingSettings>,
    pub(super) rules: Vec<DistanceRule>,
    pub(super) offers: Vec<BonusOffer>,
}

/// In-memory repository backing the service and router tests.
#[derive(Default, Clone)]
pub(super) struct MemoryPricingRepository {
    pub(super) state: Arc<Mutex<MemoryState>>,
}

impl MemoryPricingRepository {
    pub(super) fn with_rules(rules: Vec<DistanceRule>) -> Self {
        let repository = Self::default();
        repository
            .state
            .lock()
            .expect("repository mutex poisoned")
            .rules = rules;
        repository
    }

    pub(super) fn with_offers(offers: Vec<BonusOffer>) -> Self {
        let repository = Self::default();
        repository
            .state
            .lock()
            .expect("repository mutex poisoned")
            .offers = offers;
        repository
    }

    pub(super) fn rule_count(&self) -> usize {
        self.state
            .lock()
            .expect("repository mutex poisoned")
            .rules
            .len()
    }
}

impl PricingRepository for MemoryPricingRepository {
    fn load_settings(
        &self,
        tenant: &TenantId,
    ) -> Result<Option<PricingSettings>, RepositoryError> {
        let guard = self.state.lock().expect("repository mutex poisoned");
        Ok(guard.settings.get(tenant).cloned())
    }

    fn save_settings(
        &self,
        tenant: &TenantId,
        settings: &PricingSettings,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.state.lock().expect("repository mutex poisoned");
        guard.settings.insert(tenant.clone(), settings.clone());
        Ok(())
    }

    fn distance_rules(&self, tenant: &TenantId) -> Result<Vec<DistanceRule>, RepositoryError> {
        let guard = self.state.lock().expect("repository mutex poisoned");
        Ok(guard
            .rules
            .iter()
            .filter(|rule| &rule.tenant_id == tenant)
            .cloned()
            .collect())
    }

    fn insert_rule(&self, rule: DistanceRule) -> Result<DistanceRule, RepositoryError> {
        let mut guard = self.state.lock().expect("repository mutex poisoned");
        if guard.rules.iter().any(|existing| existing.id == rule.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.rules.push(rule.clone());
        Ok(rule)
    }

    fn update_rule(&self, rule: DistanceRule) -> Result<(), RepositoryError> {
        let mut guard = self.state.lock().expect("repository mutex poisoned");
        match guard.rules.iter_mut().find(|existing| existing.id == rule.id) {
            Some(existing) => {
                *existing = rule;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete_rule(&self, tenant: &TenantId, id: &RuleId) -> Result<(), RepositoryError> {
        let mut guard = self.state.lock().expect("repository mutex poisoned");
        let before = guard.rules.len();
        guard
            .rules
            .retain(|rule| !(&rule.tenant_id == tenant && &rule.id == id));
        if guard.rules.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn offers(&self, tenant: &TenantId) -> Result<Vec<BonusOffer>, RepositoryError> {
        let guard = self.state.lock().expect("repository mutex poisoned");
        Ok(guard
            .offers
            .iter()
            .filter(|offer| &offer.tenant_id == tenant)
            .cloned()
            .collect())
    }
}

/// Repository that refuses every call, for persistence-failure paths.
pub(super) struct UnavailableRepository;

impl PricingRepository for UnavailableRepository {
    fn load_settings(
        &self,
        _tenant: &TenantId,
    ) -> Result<Option<PricingSettings>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_settings(
        &self,
        _tenant: &TenantId,
        _settings: &PricingSettings,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn distance_rules(&self, _tenant: &TenantId) -> Result<Vec<DistanceRule>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_rule(&self, _rule: DistanceRule) -> Result<DistanceRule, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_rule(&self, _rule: DistanceRule) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_rule(&self, _tenant: &TenantId, _id: &RuleId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn offers(&self, _tenant: &TenantId) -> Result<Vec<BonusOffer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    PricingService<MemoryPricingRepository>,
    Arc<MemoryPricingRepository>,
) {
    let repository = Arc::new(MemoryPricingRepository::default());
    let service = PricingService::with_defaults(repository.clone(), settings());
    (service, repository)
}

pub(super) fn pricing_router_with_service(
    service: PricingService<MemoryPricingRepository>,
) -> axum::Router {
    pricing_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
