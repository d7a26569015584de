use super::common::*;
use crate::pricing::domain::{FuelType, PartsDeclaration};
use crate::pricing::valuation::{ValuationEngine, ValuationFactor};

fn engine() -> ValuationEngine {
    ValuationEngine::new(settings())
}

#[test]
fn age_bonus_and_pickup_bracket_sum_without_custom_rules() {
    // Seven-year-old car picked up 35 km away: 5000 + (-500) = 4500.
    let outcome = engine().quote(&pickup_request(7.0, 2019, 35.0), &[]);

    assert_eq!(outcome.total_sek, 4500);
    assert_eq!(outcome.components.len(), 2);
    assert!(outcome
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::AgeBonus
            && component.amount_sek == 5000));
    assert!(outcome
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::DistanceAdjustment
            && component.amount_sek == -500));
}

#[test]
fn custom_distance_rule_stacks_on_top_of_the_fixed_bracket() {
    let outcome = engine().quote(&pickup_request(7.0, 2019, 35.0), &tiered_rules());

    assert_eq!(outcome.total_sek, 4500 - 500);
    assert!(outcome
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::DistanceRule
            && component.amount_sek == -500));
}

#[test]
fn unbounded_distance_rule_applies_far_out() {
    let outcome = engine().quote(&pickup_request(7.0, 2019, 75.0), &tiered_rules());

    let rule_term = outcome
        .components
        .iter()
        .find(|component| component.factor == ValuationFactor::DistanceRule)
        .expect("distance rule term present");
    assert_eq!(rule_term.amount_sek, -1000);
}

#[test]
fn old_car_deduction_applies_below_1990() {
    let outcome = engine().quote(&pickup_request(36.0, 1989, 10.0), &[]);

    assert!(outcome
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::OldCarDeduction
            && component.amount_sek == -300));

    let modern = engine().quote(&pickup_request(36.0, 1990, 10.0), &[]);
    assert!(!modern
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::OldCarDeduction));
}

#[test]
fn dropoff_bonus_depends_on_completeness() {
    let complete = engine().quote(&dropoff_request(7.0, 2019, true), &[]);
    let incomplete = engine().quote(&dropoff_request(7.0, 2019, false), &[]);

    assert_eq!(complete.total_sek, 5000 + 500);
    assert_eq!(incomplete.total_sek, 5000 + 250);
}

#[test]
fn dropoff_never_consults_distance_rules() {
    let outcome = engine().quote(&dropoff_request(7.0, 2019, true), &tiered_rules());

    assert!(!outcome
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::DistanceRule));
}

#[test]
fn both_parts_bonuses_may_apply_simultaneously() {
    let mut request = pickup_request(7.0, 2019, 10.0);
    request.parts = PartsDeclaration {
        drivetrain: true,
        accessories: true,
    };

    let outcome = engine().quote(&request, &[]);

    let parts_total: i64 = outcome
        .components
        .iter()
        .filter(|component| component.factor == ValuationFactor::PartsBonus)
        .map(|component| component.amount_sek)
        .sum();
    assert_eq!(parts_total, 400 + 200);
}

#[test]
fn fuel_adjustment_applies_only_for_other() {
    let mut request = pickup_request(7.0, 2019, 10.0);
    request.vehicle.fuel = FuelType::Other;

    let outcome = engine().quote(&request, &[]);
    assert!(outcome
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::FuelAdjustment
            && component.amount_sek == -500));

    request.vehicle.fuel = FuelType::Electric;
    let electric = engine().quote(&request, &[]);
    assert!(!electric
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::FuelAdjustment));
}

#[test]
fn total_may_go_negative() {
    // Young car (0 bonus), far pickup, punitive custom rule, damaged fuel
    // system: the engine reports a net deduction rather than flooring.
    let mut request = pickup_request(2.0, 1989, 120.0);
    request.vehicle.fuel = FuelType::Other;

    let rules = vec![rule("rule-far", 100.0, None, -2000)];
    let outcome = engine().quote(&request, &rules);

    assert!(outcome.total_sek < 0);
    assert_eq!(outcome.total_sek, 0 - 300 - 1200 - 2000 - 500);
}

#[test]
fn breakdown_totals_match_component_sum() {
    let mut request = pickup_request(22.0, 1985, 80.0);
    request.parts.drivetrain = true;

    let outcome = engine().quote(&request, &tiered_rules());

    let sum: i64 = outcome
        .components
        .iter()
        .map(|component| component.amount_sek)
        .sum();
    assert_eq!(outcome.total_sek, sum);
}

#[test]
fn age_bracket_boundaries_are_lower_inclusive() {
    let at_five = engine().quote(&pickup_request(5.0, 2019, 10.0), &[]);
    assert!(at_five
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::AgeBonus
            && component.amount_sek == 5000));

    let just_under = engine().quote(&pickup_request(4.99, 2019, 10.0), &[]);
    assert!(just_under
        .components
        .iter()
        .any(|component| component.factor == ValuationFactor::AgeBonus
            && component.amount_sek == 0));
}
