use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use skrotbil::coverage::{
    CoverageStore, CoverageStoreError, PostalCodeId, PostalCodeRegister,
};
use skrotbil::dispatch::{
    CustomerRequest, DispatchRepository, DispatchStoreError, OrderId, PickupOrder, RequestId,
};
use skrotbil::messaging::{SmsError, SmsGateway, SmsMessage};
use skrotbil::pricing::{
    BonusOffer, DistanceRule, FuelType, OfferId, PricingRepository, PricingSettings,
    RepositoryError, RuleId,
};
use skrotbil::tenant::TenantId;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Postal register snapshot bundled with the binary so the service runs
/// without an external file. Replaceable via SKROTBIL_REGISTER_PATH.
const BUNDLED_REGISTER: &str = "\
Postnummer,Postort,Län
111 20,Stockholm,Stockholms län
113 30,Stockholm,Stockholms län
141 02,Huddinge,Stockholms län
211 15,Malmö,Skåne län
213 77,Malmö,Skåne län
222 22,Lund,Skåne län
252 25,Helsingborg,Skåne län
411 05,Göteborg,Västra Götalands län
417 05,Göteborg,Västra Götalands län
451 30,Uddevalla,Västra Götalands län
";

pub(crate) fn load_register() -> Result<PostalCodeRegister, skrotbil::error::AppError> {
    match std::env::var("SKROTBIL_REGISTER_PATH") {
        Ok(path) => {
            let file = std::fs::File::open(&path)?;
            Ok(PostalCodeRegister::from_reader(file)?)
        }
        Err(_) => Ok(PostalCodeRegister::from_reader(BUNDLED_REGISTER.as_bytes())?),
    }
}

#[derive(Default)]
struct PricingTables {
    settings: HashMap<TenantId, PricingSettings>,
    rules: Vec<DistanceRule>,
    offers: Vec<BonusOffer>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPricingRepository {
    tables: Arc<Mutex<PricingTables>>,
}

impl InMemoryPricingRepository {
    /// Seed a tenant with a campaign offer spanning today so demos have
    /// data to show.
    pub(crate) fn seed_offers(&self, tenant: &TenantId) {
        let today = chrono::Local::now().date_naive();
        let mut guard = self.tables.lock().expect("pricing tables mutex poisoned");
        guard.offers.push(BonusOffer {
            id: OfferId("offer-recycling".to_string()),
            tenant_id: tenant.clone(),
            name: "Återvinningskampanj".to_string(),
            amount_sek: 1000,
            start_date: today - chrono::Duration::days(30),
            end_date: today + chrono::Duration::days(30),
            conditions: serde_json::json!({ "note": "registered private owner" }),
            is_active: true,
        });
    }
}

impl PricingRepository for InMemoryPricingRepository {
    fn load_settings(
        &self,
        tenant: &TenantId,
    ) -> Result<Option<PricingSettings>, RepositoryError> {
        let guard = self.tables.lock().expect("pricing tables mutex poisoned");
        Ok(guard.settings.get(tenant).cloned())
    }

    fn save_settings(
        &self,
        tenant: &TenantId,
        settings: &PricingSettings,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("pricing tables mutex poisoned");
        guard.settings.insert(tenant.clone(), settings.clone());
        Ok(())
    }

    fn distance_rules(&self, tenant: &TenantId) -> Result<Vec<DistanceRule>, RepositoryError> {
        let guard = self.tables.lock().expect("pricing tables mutex poisoned");
        Ok(guard
            .rules
            .iter()
            .filter(|rule| &rule.tenant_id == tenant)
            .cloned()
            .collect())
    }

    fn insert_rule(&self, rule: DistanceRule) -> Result<DistanceRule, RepositoryError> {
        let mut guard = self.tables.lock().expect("pricing tables mutex poisoned");
        if guard.rules.iter().any(|existing| existing.id == rule.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.rules.push(rule.clone());
        Ok(rule)
    }

    fn update_rule(&self, rule: DistanceRule) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("pricing tables mutex poisoned");
        match guard.rules.iter_mut().find(|existing| existing.id == rule.id) {
            Some(existing) => {
                *existing = rule;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete_rule(&self, tenant: &TenantId, id: &RuleId) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("pricing tables mutex poisoned");
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
        let guard = self.tables.lock().expect("pricing tables mutex poisoned");
        Ok(guard
            .offers
            .iter()
            .filter(|offer| &offer.tenant_id == tenant)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCoverageStore {
    rows: Arc<Mutex<HashMap<TenantId, BTreeSet<PostalCodeId>>>>,
}

impl CoverageStore for InMemoryCoverageStore {
    fn selected(&self, tenant: &TenantId) -> Result<BTreeSet<PostalCodeId>, CoverageStoreError> {
        let guard = self.rows.lock().expect("coverage rows mutex poisoned");
        Ok(guard.get(tenant).cloned().unwrap_or_default())
    }

    fn insert_batch(
        &self,
        tenant: &TenantId,
        codes: &[PostalCodeId],
    ) -> Result<(), CoverageStoreError> {
        let mut guard = self.rows.lock().expect("coverage rows mutex poisoned");
        guard
            .entry(tenant.clone())
            .or_default()
            .extend(codes.iter().cloned());
        Ok(())
    }

    fn remove_batch(
        &self,
        tenant: &TenantId,
        codes: &[PostalCodeId],
    ) -> Result<(), CoverageStoreError> {
        let mut guard = self.rows.lock().expect("coverage rows mutex poisoned");
        if let Some(selected) = guard.get_mut(tenant) {
            for code in codes {
                selected.remove(code);
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct DispatchTables {
    requests: HashMap<RequestId, CustomerRequest>,
    orders: HashMap<OrderId, PickupOrder>,
}

/// Request and order land under a single lock, which is what keeps intake
/// atomic for the in-memory deployment.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDispatchRepository {
    tables: Arc<Mutex<DispatchTables>>,
}

impl DispatchRepository for InMemoryDispatchRepository {
    fn create_request_with_order(
        &self,
        request: CustomerRequest,
        order: PickupOrder,
    ) -> Result<PickupOrder, DispatchStoreError> {
        let mut guard = self.tables.lock().expect("dispatch tables mutex poisoned");
        if guard.requests.contains_key(&request.id) || guard.orders.contains_key(&order.id) {
            return Err(DispatchStoreError::Conflict);
        }
        guard.requests.insert(request.id.clone(), request);
        guard.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    fn fetch_order(&self, id: &OrderId) -> Result<Option<PickupOrder>, DispatchStoreError> {
        let guard = self.tables.lock().expect("dispatch tables mutex poisoned");
        Ok(guard.orders.get(id).cloned())
    }

    fn update_order(&self, order: PickupOrder) -> Result<(), DispatchStoreError> {
        let mut guard = self.tables.lock().expect("dispatch tables mutex poisoned");
        if guard.orders.contains_key(&order.id) {
            guard.orders.insert(order.id.clone(), order);
            Ok(())
        } else {
            Err(DispatchStoreError::NotFound)
        }
    }
}

/// Gateway that records instead of delivering; the demo prints what an SMS
/// provider adapter would have sent.
#[derive(Default, Clone)]
pub(crate) struct RecordingSmsGateway {
    messages: Arc<Mutex<Vec<SmsMessage>>>,
}

impl RecordingSmsGateway {
    pub(crate) fn messages(&self) -> Vec<SmsMessage> {
        self.messages
            .lock()
            .expect("sms log mutex poisoned")
            .clone()
    }
}

impl SmsGateway for RecordingSmsGateway {
    fn send(&self, message: SmsMessage) -> Result<(), SmsError> {
        self.messages
            .lock()
            .expect("sms log mutex poisoned")
            .push(message);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_fuel(raw: &str) -> Result<FuelType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "gasoline" | "bensin" => Ok(FuelType::Gasoline),
        "ethanol" | "etanol" => Ok(FuelType::Ethanol),
        "electric" | "el" => Ok(FuelType::Electric),
        "other" | "övrigt" => Ok(FuelType::Other),
        other => Err(format!(
            "unknown fuel type '{other}' (expected gasoline, ethanol, electric, or other)"
        )),
    }
}
