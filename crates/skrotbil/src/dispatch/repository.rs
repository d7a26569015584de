use super::domain::{CustomerRequest, OrderId, PickupOrder};

/// Storage abstraction over the request and order tables.
pub trait DispatchRepository: Send + Sync {
    /// Persist the customer request and its pickup order as one atomic
    /// unit: implementations must guarantee both rows land or neither does.
    /// There is no compensating-delete path to maintain.
    fn create_request_with_order(
        &self,
        request: CustomerRequest,
        order: PickupOrder,
    ) -> Result<PickupOrder, DispatchStoreError>;

    fn fetch_order(&self, id: &OrderId) -> Result<Option<PickupOrder>, DispatchStoreError>;

    fn update_order(&self, order: PickupOrder) -> Result<(), DispatchStoreError>;
}

/// Error enumeration for dispatch store failures.
#[derive(Debug, thiserror::Error)]
pub enum DispatchStoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("dispatch store unavailable: {0}")]
    Unavailable(String),
}
