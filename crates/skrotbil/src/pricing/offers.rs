use chrono::NaiveDate;

use super::domain::BonusOffer;

/// Offers whose inclusive `[start_date, end_date]` window covers `as_of`,
/// skipping soft-deleted rows. The `conditions` payload is not consulted:
/// qualification against it stays a manual-review concern.
pub fn active_offers(offers: &[BonusOffer], as_of: NaiveDate) -> Vec<&BonusOffer> {
    offers
        .iter()
        .filter(|offer| offer.is_active)
        .filter(|offer| offer.start_date <= as_of && as_of <= offer.end_date)
        .collect()
}
