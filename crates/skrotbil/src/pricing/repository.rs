use super::domain::{BonusOffer, DistanceRule, RuleId};
use super::settings::PricingSettings;
use crate::tenant::TenantId;

/// Storage abstraction over the tenant pricing tables so the service module
/// can be exercised in isolation.
pub trait PricingRepository: Send + Sync {
    fn load_settings(&self, tenant: &TenantId)
        -> Result<Option<PricingSettings>, RepositoryError>;
    fn save_settings(
        &self,
        tenant: &TenantId,
        settings: &PricingSettings,
    ) -> Result<(), RepositoryError>;
    fn distance_rules(&self, tenant: &TenantId) -> Result<Vec<DistanceRule>, RepositoryError>;
    fn insert_rule(&self, rule: DistanceRule) -> Result<DistanceRule, RepositoryError>;
    fn update_rule(&self, rule: DistanceRule) -> Result<(), RepositoryError>;
    fn delete_rule(&self, tenant: &TenantId, id: &RuleId) -> Result<(), RepositoryError>;
    fn offers(&self, tenant: &TenantId) -> Result<Vec<BonusOffer>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
