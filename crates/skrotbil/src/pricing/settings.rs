use serde::{Deserialize, Serialize};

use super::domain::FuelType;

/// Per-tenant pricing dials, persisted as a nested JSON blob. The serde
/// renames reproduce the stored bracket keys exactly, so a blob written by
/// an earlier deployment round-trips without rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(rename = "ageBonuses")]
    pub age_bonuses: AgeBonuses,
    #[serde(rename = "oldCarDeduction")]
    pub old_car_deduction: OldCarDeduction,
    #[serde(rename = "distanceAdjustments")]
    pub distance_adjustments: DistanceAdjustments,
    #[serde(rename = "partsBonuses")]
    pub parts_bonuses: PartsBonuses,
    #[serde(rename = "fuelAdjustments")]
    pub fuel_adjustments: FuelAdjustments,
}

/// Bonus per vehicle-age bracket, in whole SEK. All bonuses are >= 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBonuses {
    #[serde(rename = "0-4.99")]
    pub under_5: i64,
    #[serde(rename = "5-9.99")]
    pub from_5_to_10: i64,
    #[serde(rename = "10-14.99")]
    pub from_10_to_15: i64,
    #[serde(rename = "15-19.99")]
    pub from_15_to_20: i64,
    #[serde(rename = "20+")]
    pub over_20: i64,
}

/// Flat deduction for vehicles registered before 1990. Zero or negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldCarDeduction {
    #[serde(rename = "pre1990")]
    pub pre_1990: i64,
}

/// Drop-off bonuses (>= 0) and pickup-distance bracket deductions (<= 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceAdjustments {
    #[serde(rename = "dropoffComplete")]
    pub dropoff_complete: i64,
    #[serde(rename = "dropoffIncomplete")]
    pub dropoff_incomplete: i64,
    #[serde(rename = "0-20km")]
    pub pickup_under_20: i64,
    #[serde(rename = "20-50km")]
    pub pickup_20_to_50: i64,
    #[serde(rename = "50-75km")]
    pub pickup_50_to_75: i64,
    #[serde(rename = "75-100km")]
    pub pickup_75_to_100: i64,
    #[serde(rename = "100+km")]
    pub pickup_over_100: i64,
}

/// Bonuses for parts still present on the vehicle. Both >= 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartsBonuses {
    pub drivetrain: i64,
    pub accessories: i64,
}

/// Adjustment per fuel type. Gasoline, ethanol, and electric are fixed at
/// zero by policy; only `other` is tenant-editable (<= 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelAdjustments {
    pub gasoline: i64,
    pub ethanol: i64,
    pub electric: i64,
    pub other: i64,
}

impl FuelAdjustments {
    pub fn for_fuel(&self, fuel: FuelType) -> i64 {
        match fuel {
            FuelType::Gasoline => self.gasoline,
            FuelType::Ethanol => self.ethanol,
            FuelType::Electric => self.electric,
            FuelType::Other => self.other,
        }
    }
}

/// Validation failure naming the offending blob key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("value {value} for '{field}' outside allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl PricingSettings {
    /// Baseline dial positions for a newly provisioned tenant.
    pub fn standard() -> Self {
        Self {
            age_bonuses: AgeBonuses {
                under_5: 0,
                from_5_to_10: 500,
                from_10_to_15: 1000,
                from_15_to_20: 1500,
                over_20: 2000,
            },
            old_car_deduction: OldCarDeduction { pre_1990: -300 },
            distance_adjustments: DistanceAdjustments {
                dropoff_complete: 500,
                dropoff_incomplete: 250,
                pickup_under_20: 0,
                pickup_20_to_50: -300,
                pickup_50_to_75: -600,
                pickup_75_to_100: -900,
                pickup_over_100: -1200,
            },
            parts_bonuses: PartsBonuses {
                drivetrain: 400,
                accessories: 200,
            },
            fuel_adjustments: FuelAdjustments {
                gasoline: 0,
                ethanol: 0,
                electric: 0,
                other: -500,
            },
        }
    }

    /// Check every field against its fixed `[min, max]` range before a save
    /// is accepted.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value, min, max) in self.bounded_fields() {
            if value < min || value > max {
                return Err(SettingsError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    fn bounded_fields(&self) -> [(&'static str, i64, i64, i64); 19] {
        let age = &self.age_bonuses;
        let distance = &self.distance_adjustments;
        let parts = &self.parts_bonuses;
        let fuel = &self.fuel_adjustments;
        [
            ("0-4.99", age.under_5, 0, 25_000),
            ("5-9.99", age.from_5_to_10, 0, 25_000),
            ("10-14.99", age.from_10_to_15, 0, 25_000),
            ("15-19.99", age.from_15_to_20, 0, 25_000),
            ("20+", age.over_20, 0, 25_000),
            ("pre1990", self.old_car_deduction.pre_1990, -10_000, 0),
            ("dropoffComplete", distance.dropoff_complete, 0, 5_000),
            ("dropoffIncomplete", distance.dropoff_incomplete, 0, 5_000),
            ("0-20km", distance.pickup_under_20, -10_000, 0),
            ("20-50km", distance.pickup_20_to_50, -10_000, 0),
            ("50-75km", distance.pickup_50_to_75, -10_000, 0),
            ("75-100km", distance.pickup_75_to_100, -10_000, 0),
            ("100+km", distance.pickup_over_100, -10_000, 0),
            ("drivetrain", parts.drivetrain, 0, 10_000),
            ("accessories", parts.accessories, 0, 10_000),
            // fuel rows other than `other` are not dials; they stay pinned at zero
            ("gasoline", fuel.gasoline, 0, 0),
            ("ethanol", fuel.ethanol, 0, 0),
            ("electric", fuel.electric, 0, 0),
            ("other", fuel.other, -5_000, 0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_round_trip_preserves_every_bracket_value() {
        let settings = PricingSettings::standard();
        let blob = serde_json::to_string(&settings).expect("settings serialize");
        let restored: PricingSettings = serde_json::from_str(&blob).expect("settings deserialize");
        assert_eq!(restored, settings);
    }

    #[test]
    fn blob_uses_stored_bracket_keys() {
        let value = serde_json::to_value(PricingSettings::standard()).expect("to value");
        let age = value.get("ageBonuses").expect("ageBonuses present");
        for key in ["0-4.99", "5-9.99", "10-14.99", "15-19.99", "20+"] {
            assert!(age.get(key).is_some(), "missing age bracket key {key}");
        }
        let distance = value
            .get("distanceAdjustments")
            .expect("distanceAdjustments present");
        for key in [
            "dropoffComplete",
            "dropoffIncomplete",
            "0-20km",
            "20-50km",
            "50-75km",
            "75-100km",
            "100+km",
        ] {
            assert!(distance.get(key).is_some(), "missing distance key {key}");
        }
        assert!(value
            .get("oldCarDeduction")
            .and_then(|blob| blob.get("pre1990"))
            .is_some());
        assert!(value
            .get("fuelAdjustments")
            .and_then(|blob| blob.get("other"))
            .is_some());
    }

    #[test]
    fn validate_rejects_positive_pickup_bracket() {
        let mut settings = PricingSettings::standard();
        settings.distance_adjustments.pickup_20_to_50 = 100;
        match settings.validate() {
            Err(SettingsError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "20-50km");
                assert_eq!(value, 100);
            }
            other => panic!("expected out-of-range error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_oversized_age_bonus() {
        let mut settings = PricingSettings::standard();
        settings.age_bonuses.over_20 = 30_000;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OutOfRange { field: "20+", .. })
        ));
    }

    #[test]
    fn fixed_fuel_rows_must_stay_zero() {
        let mut settings = PricingSettings::standard();
        settings.fuel_adjustments.electric = -200;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OutOfRange {
                field: "electric",
                ..
            })
        ));
    }
}
