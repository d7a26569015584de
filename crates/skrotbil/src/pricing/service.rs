use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::cache::SettingsCache;
use super::domain::{BonusOffer, DistanceRule, DistanceRuleDraft, QuoteRequest, RuleId};
use super::offers::active_offers;
use super::repository::{PricingRepository, RepositoryError};
use super::rules::{validate_rule, RuleViolation};
use super::settings::{PricingSettings, SettingsError};
use super::valuation::{QuoteOutcome, ValuationEngine};
use crate::tenant::TenantId;

/// Service composing the rule validator, valuation engine, offer matcher,
/// and settings cache over a repository.
pub struct PricingService<R> {
    repository: Arc<R>,
    cache: SettingsCache,
    defaults: PricingSettings,
}

static RULE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_rule_id() -> RuleId {
    let id = RULE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RuleId(format!("rule-{id:06}"))
}

impl<R> PricingService<R>
where
    R: PricingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_defaults(repository, PricingSettings::standard())
    }

    /// `defaults` applies to tenants with no persisted settings blob yet.
    pub fn with_defaults(repository: Arc<R>, defaults: PricingSettings) -> Self {
        Self {
            repository,
            cache: SettingsCache::default(),
            defaults,
        }
    }

    /// Effective settings for a tenant: cache, then repository, then the
    /// provisioning defaults.
    pub fn settings(&self, tenant: &TenantId) -> Result<Arc<PricingSettings>, PricingServiceError> {
        if let Some(cached) = self.cache.get(tenant) {
            return Ok(cached);
        }

        let loaded = self.repository.load_settings(tenant)?;
        let settings = Arc::new(loaded.unwrap_or_else(|| self.defaults.clone()));
        self.cache.store(tenant.clone(), settings.clone());
        Ok(settings)
    }

    /// Validate and persist a tenant's settings blob, refreshing the cache.
    pub fn save_settings(
        &self,
        tenant: &TenantId,
        settings: PricingSettings,
    ) -> Result<(), PricingServiceError> {
        settings.validate()?;
        self.cache.invalidate(tenant);
        self.repository.save_settings(tenant, &settings)?;
        self.cache.store(tenant.clone(), Arc::new(settings));
        Ok(())
    }

    /// Price a vehicle for its tenant, combining the settings brackets with
    /// the tenant's custom distance rules.
    pub fn quote(&self, request: &QuoteRequest) -> Result<QuoteOutcome, PricingServiceError> {
        let settings = self.settings(&request.tenant_id)?;
        let rules = self.repository.distance_rules(&request.tenant_id)?;
        let engine = ValuationEngine::new((*settings).clone());
        Ok(engine.quote(request, &rules))
    }

    pub fn distance_rules(
        &self,
        tenant: &TenantId,
    ) -> Result<Vec<DistanceRule>, PricingServiceError> {
        Ok(self.repository.distance_rules(tenant)?)
    }

    /// Validate a draft against the tenant's existing rules and persist it.
    pub fn create_rule(
        &self,
        draft: DistanceRuleDraft,
    ) -> Result<DistanceRule, PricingServiceError> {
        let rule = draft.into_rule(next_rule_id());
        let existing = self.repository.distance_rules(&rule.tenant_id)?;
        validate_rule(&rule, &existing, None)?;
        Ok(self.repository.insert_rule(rule)?)
    }

    /// Re-validate an edited rule, excluding itself from the overlap scan.
    pub fn update_rule(&self, rule: DistanceRule) -> Result<(), PricingServiceError> {
        let existing = self.repository.distance_rules(&rule.tenant_id)?;
        validate_rule(&rule, &existing, Some(&rule.id))?;
        self.repository.update_rule(rule)?;
        Ok(())
    }

    pub fn delete_rule(&self, tenant: &TenantId, id: &RuleId) -> Result<(), PricingServiceError> {
        self.repository.delete_rule(tenant, id)?;
        Ok(())
    }

    /// Offers live on `as_of` for the tenant, soft-deleted rows excluded.
    pub fn offers(
        &self,
        tenant: &TenantId,
        as_of: NaiveDate,
    ) -> Result<Vec<BonusOffer>, PricingServiceError> {
        let offers = self.repository.offers(tenant)?;
        Ok(active_offers(&offers, as_of).into_iter().cloned().collect())
    }
}

/// Error raised by the pricing service.
#[derive(Debug, thiserror::Error)]
pub enum PricingServiceError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
