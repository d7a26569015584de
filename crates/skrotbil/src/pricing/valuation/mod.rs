mod brackets;

use serde::{Deserialize, Serialize};

use super::domain::{Collection, DistanceRule, QuoteRequest};
use super::rules::matching_rule;
use super::settings::PricingSettings;
use crate::tenant::TenantId;
use brackets::{AgeBracket, PickupBracket};

/// Stateless engine applying one tenant's pricing dials to a quote request.
///
/// Every applicable term contributes additively; nothing short-circuits and
/// the total is never floored at zero. A negative total is a net deduction
/// from the base valuation.
pub struct ValuationEngine {
    settings: PricingSettings,
}

impl ValuationEngine {
    pub fn new(settings: PricingSettings) -> Self {
        Self { settings }
    }

    pub fn quote(&self, request: &QuoteRequest, distance_rules: &[DistanceRule]) -> QuoteOutcome {
        let mut components = Vec::new();
        let mut total: i64 = 0;
        let mut push = |component: QuoteComponent| {
            total += component.amount_sek;
            components.push(component);
        };

        let age_bracket = AgeBracket::for_age(request.vehicle.age_years);
        push(QuoteComponent {
            factor: ValuationFactor::AgeBonus,
            amount_sek: age_bracket.bonus(&self.settings),
            notes: format!(
                "vehicle age {:.1} years in bracket {}",
                request.vehicle.age_years,
                age_bracket.label()
            ),
        });

        if request.vehicle.model_year < 1990 {
            push(QuoteComponent {
                factor: ValuationFactor::OldCarDeduction,
                amount_sek: self.settings.old_car_deduction.pre_1990,
                notes: format!("model year {} before 1990", request.vehicle.model_year),
            });
        }

        match request.collection {
            Collection::DropOff { complete } => {
                let distance = &self.settings.distance_adjustments;
                let (amount, detail) = if complete {
                    (distance.dropoff_complete, "complete vehicle delivered")
                } else {
                    (distance.dropoff_incomplete, "incomplete vehicle delivered")
                };
                push(QuoteComponent {
                    factor: ValuationFactor::DistanceAdjustment,
                    amount_sek: amount,
                    notes: detail.to_string(),
                });
            }
            Collection::Pickup { distance_km } => {
                let bracket = PickupBracket::for_distance(distance_km);
                push(QuoteComponent {
                    factor: ValuationFactor::DistanceAdjustment,
                    amount_sek: bracket.deduction(&self.settings),
                    notes: format!(
                        "pickup at {distance_km:.1} km in bracket {}",
                        bracket.label()
                    ),
                });

                // Tenant-defined rules stack on top of the fixed bracket;
                // the two distance mechanisms are independent layers.
                if let Some(rule) = matching_rule(distance_rules, distance_km) {
                    push(QuoteComponent {
                        factor: ValuationFactor::DistanceRule,
                        amount_sek: rule.deduction_sek,
                        notes: format!(
                            "rule {} covers {:.1} km",
                            rule.id.0, distance_km
                        ),
                    });
                }
            }
        }

        if request.parts.drivetrain {
            push(QuoteComponent {
                factor: ValuationFactor::PartsBonus,
                amount_sek: self.settings.parts_bonuses.drivetrain,
                notes: "engine/transmission/catalytic converter present".to_string(),
            });
        }
        if request.parts.accessories {
            push(QuoteComponent {
                factor: ValuationFactor::PartsBonus,
                amount_sek: self.settings.parts_bonuses.accessories,
                notes: "battery/wheels/completeness bonus".to_string(),
            });
        }

        let fuel_adjustment = self.settings.fuel_adjustments.for_fuel(request.vehicle.fuel);
        if fuel_adjustment != 0 {
            push(QuoteComponent {
                factor: ValuationFactor::FuelAdjustment,
                amount_sek: fuel_adjustment,
                notes: format!("fuel type {}", request.vehicle.fuel.label()),
            });
        }

        QuoteOutcome {
            tenant_id: request.tenant_id.clone(),
            total_sek: total,
            components,
        }
    }
}

/// Named source of a quote contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationFactor {
    AgeBonus,
    OldCarDeduction,
    DistanceAdjustment,
    DistanceRule,
    PartsBonus,
    FuelAdjustment,
}

/// Discrete contribution to a quote, retained for display and audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteComponent {
    pub factor: ValuationFactor,
    pub amount_sek: i64,
    pub notes: String,
}

/// Quote output: the additive total and the full contribution trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteOutcome {
    pub tenant_id: TenantId,
    pub total_sek: i64,
    pub components: Vec<QuoteComponent>,
}
