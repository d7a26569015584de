use super::domain::{DistanceRule, RuleId};

/// Validation failures for tenant distance rules. Range problems abort the
/// save with a 422; an overlap is a conflict with an existing rule (409).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleViolation {
    #[error("minimum distance must not be negative (got {min_distance_km} km)")]
    NegativeMinimum { min_distance_km: f64 },
    #[error("maximum distance {max_distance_km} km must exceed minimum {min_distance_km} km")]
    EmptyRange {
        min_distance_km: f64,
        max_distance_km: f64,
    },
    #[error("deduction must be zero or negative (got {deduction_sek} SEK)")]
    PositiveDeduction { deduction_sek: i64 },
    #[error("distance interval overlaps existing rule {}", .conflicting.0)]
    Overlap { conflicting: RuleId },
}

/// Check a new or edited rule against its own bounds and against the
/// tenant's existing rules. `exclude` names the rule being edited so it does
/// not conflict with itself. Pure check; the caller persists on success.
pub fn validate_rule(
    candidate: &DistanceRule,
    existing: &[DistanceRule],
    exclude: Option<&RuleId>,
) -> Result<(), RuleViolation> {
    if candidate.min_distance_km < 0.0 {
        return Err(RuleViolation::NegativeMinimum {
            min_distance_km: candidate.min_distance_km,
        });
    }

    if let Some(max) = candidate.max_distance_km {
        if max <= candidate.min_distance_km {
            return Err(RuleViolation::EmptyRange {
                min_distance_km: candidate.min_distance_km,
                max_distance_km: max,
            });
        }
    }

    if candidate.deduction_sek > 0 {
        return Err(RuleViolation::PositiveDeduction {
            deduction_sek: candidate.deduction_sek,
        });
    }

    for rule in existing {
        if rule.tenant_id != candidate.tenant_id {
            continue;
        }
        if exclude == Some(&rule.id) {
            continue;
        }
        if overlaps(candidate, rule) {
            return Err(RuleViolation::Overlap {
                conflicting: rule.id.clone(),
            });
        }
    }

    Ok(())
}

/// First rule whose `[min, max)` interval contains the distance. Under the
/// no-overlap invariant at most one rule matches.
pub fn matching_rule(rules: &[DistanceRule], distance_km: f64) -> Option<&DistanceRule> {
    rules.iter().find(|rule| rule.contains(distance_km))
}

/// Half-open intervals `[a1, b1)` and `[a2, b2)` intersect iff
/// `a1 < b2 && a2 < b1`, with a missing upper bound treated as infinite.
fn overlaps(a: &DistanceRule, b: &DistanceRule) -> bool {
    let starts_below = |start: f64, end: Option<f64>| end.map_or(true, |end| start < end);
    starts_below(a.min_distance_km, b.max_distance_km)
        && starts_below(b.min_distance_km, a.max_distance_km)
}
