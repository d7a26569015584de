use super::super::settings::PricingSettings;

/// Fixed vehicle-age brackets mirroring the configured bonus table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AgeBracket {
    Under5,
    From5To10,
    From10To15,
    From15To20,
    Over20,
}

impl AgeBracket {
    pub(crate) fn for_age(age_years: f64) -> Self {
        if age_years < 5.0 {
            AgeBracket::Under5
        } else if age_years < 10.0 {
            AgeBracket::From5To10
        } else if age_years < 15.0 {
            AgeBracket::From10To15
        } else if age_years < 20.0 {
            AgeBracket::From15To20
        } else {
            AgeBracket::Over20
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            AgeBracket::Under5 => "0-4.99",
            AgeBracket::From5To10 => "5-9.99",
            AgeBracket::From10To15 => "10-14.99",
            AgeBracket::From15To20 => "15-19.99",
            AgeBracket::Over20 => "20+",
        }
    }

    pub(crate) fn bonus(self, settings: &PricingSettings) -> i64 {
        let age = &settings.age_bonuses;
        match self {
            AgeBracket::Under5 => age.under_5,
            AgeBracket::From5To10 => age.from_5_to_10,
            AgeBracket::From10To15 => age.from_10_to_15,
            AgeBracket::From15To20 => age.from_15_to_20,
            AgeBracket::Over20 => age.over_20,
        }
    }
}

/// Fixed pickup-distance brackets, lower bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PickupBracket {
    Under20,
    From20To50,
    From50To75,
    From75To100,
    Over100,
}

impl PickupBracket {
    pub(crate) fn for_distance(distance_km: f64) -> Self {
        if distance_km < 20.0 {
            PickupBracket::Under20
        } else if distance_km < 50.0 {
            PickupBracket::From20To50
        } else if distance_km < 75.0 {
            PickupBracket::From50To75
        } else if distance_km < 100.0 {
            PickupBracket::From75To100
        } else {
            PickupBracket::Over100
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            PickupBracket::Under20 => "0-20km",
            PickupBracket::From20To50 => "20-50km",
            PickupBracket::From50To75 => "50-75km",
            PickupBracket::From75To100 => "75-100km",
            PickupBracket::Over100 => "100+km",
        }
    }

    pub(crate) fn deduction(self, settings: &PricingSettings) -> i64 {
        let distance = &settings.distance_adjustments;
        match self {
            PickupBracket::Under20 => distance.pickup_under_20,
            PickupBracket::From20To50 => distance.pickup_20_to_50,
            PickupBracket::From50To75 => distance.pickup_50_to_75,
            PickupBracket::From75To100 => distance.pickup_75_to_100,
            PickupBracket::Over100 => distance.pickup_over_100,
        }
    }
}
