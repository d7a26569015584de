use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::tenant::TenantId;

/// Identifier wrapper for tenant-configured distance rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

/// Identifier wrapper for promotional bonus offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferId(pub String);

/// Fuel classification feeding the fixed fuel adjustment table.
///
/// Gasoline, ethanol, and electric vehicles carry a zero adjustment by
/// policy; only `Other` (gas conversions, hybrids with damage, unknown) is
/// tenant-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Ethanol,
    Electric,
    Other,
}

impl FuelType {
    pub const fn label(self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Ethanol => "ethanol",
            FuelType::Electric => "electric",
            FuelType::Other => "other",
        }
    }
}

/// How the vehicle reaches the yard: collected by a driver, or delivered by
/// the customer (drop-off, with a completeness check on arrival).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Collection {
    Pickup { distance_km: f64 },
    DropOff { complete: bool },
}

/// Parts still present on the vehicle that qualify for bonuses. Drivetrain
/// covers engine/transmission/catalytic converter; accessories covers
/// battery, wheels, and general completeness. Both may apply at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartsDeclaration {
    #[serde(default)]
    pub drivetrain: bool,
    #[serde(default)]
    pub accessories: bool,
}

/// Vehicle facts consumed by the valuation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub model_year: i32,
    pub age_years: f64,
    pub fuel: FuelType,
}

/// Inbound quote request scoped to a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub tenant_id: TenantId,
    pub vehicle: VehicleProfile,
    pub collection: Collection,
    #[serde(default)]
    pub parts: PartsDeclaration,
}

/// Tenant-configured deduction over a half-open pickup-distance interval
/// `[min, max)`; a missing upper bound means unbounded. Distinct from the
/// fixed distance brackets in [`super::settings::PricingSettings`]; the two
/// mechanisms stack additively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRule {
    pub id: RuleId,
    pub tenant_id: TenantId,
    pub min_distance_km: f64,
    pub max_distance_km: Option<f64>,
    pub deduction_sek: i64,
}

impl DistanceRule {
    /// Whether `distance_km` falls inside the rule's `[min, max)` interval.
    pub fn contains(&self, distance_km: f64) -> bool {
        distance_km >= self.min_distance_km
            && self.max_distance_km.map_or(true, |max| distance_km < max)
    }
}

/// Payload for creating a distance rule; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRuleDraft {
    pub tenant_id: TenantId,
    pub min_distance_km: f64,
    pub max_distance_km: Option<f64>,
    pub deduction_sek: i64,
}

impl DistanceRuleDraft {
    pub(crate) fn into_rule(self, id: RuleId) -> DistanceRule {
        DistanceRule {
            id,
            tenant_id: self.tenant_id,
            min_distance_km: self.min_distance_km,
            max_distance_km: self.max_distance_km,
            deduction_sek: self.deduction_sek,
        }
    }
}

/// Promotional bonus active over an inclusive `[start_date, end_date]`
/// window. Soft-deleted by flipping `is_active` rather than removing the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusOffer {
    pub id: OfferId,
    pub tenant_id: TenantId,
    pub name: String,
    pub amount_sek: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free-form qualification notes shown to handlers during manual review;
    /// never evaluated against the vehicle automatically.
    #[serde(default)]
    pub conditions: serde_json::Value,
    pub is_active: bool,
}
