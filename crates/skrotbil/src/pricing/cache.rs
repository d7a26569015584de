use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::settings::PricingSettings;
use crate::tenant::TenantId;

/// Keyed in-memory cache so repeated quotes for a tenant skip the settings
/// read. Invalidation is explicit: the service clears the entry before
/// persisting an update and re-primes it on success.
#[derive(Default)]
pub struct SettingsCache {
    entries: Mutex<HashMap<TenantId, Arc<PricingSettings>>>,
}

impl SettingsCache {
    pub fn get(&self, tenant: &TenantId) -> Option<Arc<PricingSettings>> {
        let guard = self.entries.lock().expect("settings cache mutex poisoned");
        guard.get(tenant).cloned()
    }

    pub fn store(&self, tenant: TenantId, settings: Arc<PricingSettings>) {
        let mut guard = self.entries.lock().expect("settings cache mutex poisoned");
        guard.insert(tenant, settings);
    }

    pub fn invalidate(&self, tenant: &TenantId) {
        let mut guard = self.entries.lock().expect("settings cache mutex poisoned");
        guard.remove(tenant);
    }
}
