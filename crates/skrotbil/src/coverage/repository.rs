use std::collections::BTreeSet;

use super::domain::PostalCodeId;
use crate::tenant::TenantId;

/// Storage abstraction over the tenant coverage relation. Batch methods take
/// bounded slices; the service never hands over more than its batch size in
/// one call.
pub trait CoverageStore: Send + Sync {
    fn selected(&self, tenant: &TenantId) -> Result<BTreeSet<PostalCodeId>, CoverageStoreError>;
    fn insert_batch(
        &self,
        tenant: &TenantId,
        codes: &[PostalCodeId],
    ) -> Result<(), CoverageStoreError>;
    fn remove_batch(
        &self,
        tenant: &TenantId,
        codes: &[PostalCodeId],
    ) -> Result<(), CoverageStoreError>;
}

/// Error enumeration for coverage store failures.
#[derive(Debug, thiserror::Error)]
pub enum CoverageStoreError {
    #[error("coverage store unavailable: {0}")]
    Unavailable(String),
}
