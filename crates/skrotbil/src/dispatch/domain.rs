use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::tenant::TenantId;

/// Identifier wrapper for customer requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Identifier wrapper for pickup orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

/// Identifier wrapper for fleet drivers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriverId(pub String);

/// Lifecycle of a pickup order. Transitions are restricted to the table in
/// [`PickupStatus::can_transition`]; completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    Requested,
    Scheduled,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl PickupStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PickupStatus::Requested => "requested",
            PickupStatus::Scheduled => "scheduled",
            PickupStatus::Assigned => "assigned",
            PickupStatus::InProgress => "in_progress",
            PickupStatus::Completed => "completed",
            PickupStatus::Cancelled => "cancelled",
        }
    }

    /// Whether moving from `self` to `to` is a legal lifecycle step.
    pub fn can_transition(self, to: PickupStatus) -> bool {
        use PickupStatus::*;
        matches!(
            (self, to),
            (Requested, Scheduled)
                | (Requested, Cancelled)
                | (Scheduled, Assigned)
                | (Scheduled, Cancelled)
                | (Assigned, InProgress)
                | (Assigned, Scheduled)
                | (Assigned, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

/// Customer-facing intake form for a scrap pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeSubmission {
    pub registration: String,
    pub owner_name: String,
    pub phone: String,
    pub postal_code: String,
    pub scheduled_date: Option<NaiveDate>,
}

/// Stored customer request, created together with its pickup order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub id: RequestId,
    pub tenant_id: TenantId,
    pub registration: String,
    pub owner_name: String,
    pub phone: String,
    pub postal_code: String,
}

/// A scheduled vehicle collection derived from a customer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupOrder {
    pub id: OrderId,
    pub tenant_id: TenantId,
    pub request_id: RequestId,
    pub status: PickupStatus,
    pub driver: Option<DriverId>,
    pub scheduled_date: Option<NaiveDate>,
}
