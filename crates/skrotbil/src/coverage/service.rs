use std::collections::BTreeSet;
use std::sync::Arc;

use super::domain::{PostalCodeId, Region, RegionSelection, RegionStatus, Toggle};
use super::repository::{CoverageStore, CoverageStoreError};
use crate::tenant::TenantId;

/// Upper bound on ids per store round trip for bulk region operations.
const BATCH_SIZE: usize = 100;

/// Service maintaining the set of postal codes each tenant services.
pub struct CoverageService<R> {
    store: Arc<R>,
}

impl<R> CoverageService<R>
where
    R: CoverageStore + 'static,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    pub fn selected(&self, tenant: &TenantId) -> Result<BTreeSet<PostalCodeId>, CoverageStoreError> {
        self.store.selected(tenant)
    }

    /// Insert the code if absent, remove it if present.
    pub fn toggle(
        &self,
        tenant: &TenantId,
        code: &PostalCodeId,
    ) -> Result<Toggle, CoverageStoreError> {
        let selected = self.store.selected(tenant)?;
        if selected.contains(code) {
            self.store
                .remove_batch(tenant, std::slice::from_ref(code))?;
            Ok(Toggle::Removed)
        } else {
            self.store
                .insert_batch(tenant, std::slice::from_ref(code))?;
            Ok(Toggle::Added)
        }
    }

    /// Select every code in the region that is not yet selected. A fully
    /// selected region is a no-op reported back to the caller.
    pub fn select_region(
        &self,
        tenant: &TenantId,
        region: &Region,
    ) -> Result<RegionSelection, CoverageStoreError> {
        let selected = self.store.selected(tenant)?;
        let missing: Vec<PostalCodeId> = region
            .postal_codes
            .iter()
            .filter(|code| !selected.contains(*code))
            .cloned()
            .collect();

        if missing.is_empty() {
            return Ok(RegionSelection {
                added: 0,
                already_complete: true,
            });
        }

        for chunk in missing.chunks(BATCH_SIZE) {
            self.store.insert_batch(tenant, chunk)?;
        }

        Ok(RegionSelection {
            added: missing.len(),
            already_complete: false,
        })
    }

    /// Remove every selected code in the region; returns how many went away.
    pub fn deselect_region(
        &self,
        tenant: &TenantId,
        region: &Region,
    ) -> Result<usize, CoverageStoreError> {
        let selected = self.store.selected(tenant)?;
        let present: Vec<PostalCodeId> = region
            .postal_codes
            .iter()
            .filter(|code| selected.contains(*code))
            .cloned()
            .collect();

        for chunk in present.chunks(BATCH_SIZE) {
            self.store.remove_batch(tenant, chunk)?;
        }

        Ok(present.len())
    }

    pub fn region_status(
        &self,
        tenant: &TenantId,
        region: &Region,
    ) -> Result<RegionStatus, CoverageStoreError> {
        let selected = self.store.selected(tenant)?;
        let count = region
            .postal_codes
            .iter()
            .filter(|code| selected.contains(*code))
            .count();

        Ok(RegionStatus {
            selected: count,
            total: region.postal_codes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::coverage::domain::{CoverageLevel, RegionId};

    /// Store that records the size of every batch it receives.
    #[derive(Default)]
    struct RecordingStore {
        rows: Mutex<HashMap<TenantId, BTreeSet<PostalCodeId>>>,
        insert_batches: Mutex<Vec<usize>>,
    }

    impl CoverageStore for RecordingStore {
        fn selected(
            &self,
            tenant: &TenantId,
        ) -> Result<BTreeSet<PostalCodeId>, CoverageStoreError> {
            let guard = self.rows.lock().expect("store mutex poisoned");
            Ok(guard.get(tenant).cloned().unwrap_or_default())
        }

        fn insert_batch(
            &self,
            tenant: &TenantId,
            codes: &[PostalCodeId],
        ) -> Result<(), CoverageStoreError> {
            self.insert_batches
                .lock()
                .expect("batch log mutex poisoned")
                .push(codes.len());
            let mut guard = self.rows.lock().expect("store mutex poisoned");
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
            let mut guard = self.rows.lock().expect("store mutex poisoned");
            if let Some(selected) = guard.get_mut(tenant) {
                for code in codes {
                    selected.remove(code);
                }
            }
            Ok(())
        }
    }

    fn tenant() -> TenantId {
        TenantId("yard-001".to_string())
    }

    fn code(value: &str) -> PostalCodeId {
        PostalCodeId(value.to_string())
    }

    fn region(count: usize) -> Region {
        Region {
            id: RegionId("test-län".to_string()),
            name: "Test län".to_string(),
            postal_codes: (0..count).map(|i| code(&format!("{:05}", 10_000 + i))).collect(),
        }
    }

    fn service() -> (CoverageService<RecordingStore>, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        (CoverageService::new(store.clone()), store)
    }

    #[test]
    fn toggle_alternates_between_added_and_removed() {
        let (service, _store) = service();

        assert_eq!(
            service.toggle(&tenant(), &code("11120")).expect("toggle"),
            Toggle::Added
        );
        assert_eq!(
            service.toggle(&tenant(), &code("11120")).expect("toggle"),
            Toggle::Removed
        );
        assert!(service.selected(&tenant()).expect("selected").is_empty());
    }

    #[test]
    fn select_region_inserts_only_missing_codes() {
        let (service, _store) = service();
        let region = region(4);
        service
            .toggle(&tenant(), &region.postal_codes[0])
            .expect("preselect one code");

        let selection = service
            .select_region(&tenant(), &region)
            .expect("region selects");

        assert_eq!(selection.added, 3);
        assert!(!selection.already_complete);
        let status = service
            .region_status(&tenant(), &region)
            .expect("status reads");
        assert_eq!(status.level(), CoverageLevel::Full);
    }

    #[test]
    fn selecting_a_complete_region_is_a_no_op() {
        let (service, store) = service();
        let region = region(3);
        service
            .select_region(&tenant(), &region)
            .expect("first selection");
        let batches_before = store
            .insert_batches
            .lock()
            .expect("batch log mutex poisoned")
            .len();

        let selection = service
            .select_region(&tenant(), &region)
            .expect("second selection");

        assert_eq!(selection.added, 0);
        assert!(selection.already_complete);
        let batches_after = store
            .insert_batches
            .lock()
            .expect("batch log mutex poisoned")
            .len();
        assert_eq!(batches_before, batches_after);
    }

    #[test]
    fn bulk_selection_is_batched() {
        let (service, store) = service();
        let region = region(205);

        let selection = service
            .select_region(&tenant(), &region)
            .expect("region selects");

        assert_eq!(selection.added, 205);
        let batches = store
            .insert_batches
            .lock()
            .expect("batch log mutex poisoned")
            .clone();
        assert_eq!(batches, vec![100, 100, 5]);
    }

    #[test]
    fn deselect_region_removes_only_present_codes() {
        let (service, _store) = service();
        let region = region(4);
        service
            .select_region(&tenant(), &region)
            .expect("region selects");
        service
            .toggle(&tenant(), &region.postal_codes[0])
            .expect("drop one code");

        let removed = service
            .deselect_region(&tenant(), &region)
            .expect("region deselects");

        assert_eq!(removed, 3);
        let status = service
            .region_status(&tenant(), &region)
            .expect("status reads");
        assert_eq!(status.level(), CoverageLevel::None);
    }

    #[test]
    fn partial_region_reports_counts() {
        let (service, _store) = service();
        let region = region(4);
        service
            .toggle(&tenant(), &region.postal_codes[1])
            .expect("select one code");

        let status = service
            .region_status(&tenant(), &region)
            .expect("status reads");

        assert_eq!(status.selected, 1);
        assert_eq!(status.total, 4);
        assert_eq!(status.level(), CoverageLevel::Partial);
    }
}
