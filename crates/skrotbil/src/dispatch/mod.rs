//! Pickup dispatch: customer request intake, the pickup-order status
//! machine, and driver assignment. Status changes go through an explicit
//! transition table instead of free-form status strings handed to the
//! storage layer.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    CustomerRequest, DriverId, IntakeSubmission, OrderId, PickupOrder, PickupStatus, RequestId,
};
pub use repository::{DispatchRepository, DispatchStoreError};
pub use router::dispatch_router;
pub use service::{DispatchError, DispatchService, PickupStatusService};
