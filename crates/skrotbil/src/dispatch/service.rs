use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{
    CustomerRequest, DriverId, IntakeSubmission, OrderId, PickupOrder, PickupStatus, RequestId,
};
use super::repository::{DispatchRepository, DispatchStoreError};
use crate::tenant::TenantId;

/// Typed interface for pickup lifecycle changes, in place of dispatching
/// status strings to an opaque backend procedure.
pub trait PickupStatusService: Send + Sync {
    fn transition(&self, order_id: &OrderId, to: PickupStatus)
        -> Result<PickupOrder, DispatchError>;
    fn assign_driver(
        &self,
        order_id: &OrderId,
        driver: DriverId,
    ) -> Result<PickupOrder, DispatchError>;
}

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ORDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> RequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RequestId(format!("req-{id:06}"))
}

fn next_order_id() -> OrderId {
    let id = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OrderId(format!("order-{id:06}"))
}

/// Owned status machine over a dispatch repository.
pub struct DispatchService<R> {
    repository: Arc<R>,
}

impl<R> DispatchService<R>
where
    R: DispatchRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create the customer request and its pickup order in one repository
    /// call. An order with a scheduled date starts out scheduled.
    pub fn intake(
        &self,
        tenant: &TenantId,
        submission: IntakeSubmission,
    ) -> Result<PickupOrder, DispatchError> {
        let request = CustomerRequest {
            id: next_request_id(),
            tenant_id: tenant.clone(),
            registration: submission.registration,
            owner_name: submission.owner_name,
            phone: submission.phone,
            postal_code: submission.postal_code,
        };

        let status = if submission.scheduled_date.is_some() {
            PickupStatus::Scheduled
        } else {
            PickupStatus::Requested
        };
        let order = PickupOrder {
            id: next_order_id(),
            tenant_id: tenant.clone(),
            request_id: request.id.clone(),
            status,
            driver: None,
            scheduled_date: submission.scheduled_date,
        };

        Ok(self.repository.create_request_with_order(request, order)?)
    }

    pub fn order(&self, order_id: &OrderId) -> Result<PickupOrder, DispatchError> {
        self.repository
            .fetch_order(order_id)?
            .ok_or(DispatchError::Store(DispatchStoreError::NotFound))
    }
}

impl<R> PickupStatusService for DispatchService<R>
where
    R: DispatchRepository + 'static,
{
    fn transition(
        &self,
        order_id: &OrderId,
        to: PickupStatus,
    ) -> Result<PickupOrder, DispatchError> {
        let mut order = self.order(order_id)?;

        if !order.status.can_transition(to) {
            return Err(DispatchError::IllegalTransition {
                from: order.status,
                to,
            });
        }

        order.status = to;
        if to == PickupStatus::Scheduled {
            // returning to the pool clears the previous assignment
            order.driver = None;
        }
        self.repository.update_order(order.clone())?;
        Ok(order)
    }

    fn assign_driver(
        &self,
        order_id: &OrderId,
        driver: DriverId,
    ) -> Result<PickupOrder, DispatchError> {
        let mut order = self.order(order_id)?;

        if order.status != PickupStatus::Scheduled {
            return Err(DispatchError::NotAssignable {
                status: order.status,
            });
        }

        order.driver = Some(driver);
        order.status = PickupStatus::Assigned;
        self.repository.update_order(order.clone())?;
        Ok(order)
    }
}

/// Error raised by the dispatch service.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("illegal status transition {} -> {}", .from.label(), .to.label())]
    IllegalTransition {
        from: PickupStatus,
        to: PickupStatus,
    },
    #[error("driver assignment requires a scheduled order (status is {})", .status.label())]
    NotAssignable { status: PickupStatus },
    #[error(transparent)]
    Store(#[from] DispatchStoreError),
}
