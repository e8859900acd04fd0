use chrono::{DateTime, Duration, Utc};

use crate::config::BackendConfig;
use crate::db::PromoRecord;
use crate::methods::{promo, rental_rate};
use crate::model::{AppliedPromo, BikeSummary, PriceQuote};

/// Bookings may start slightly in the past to absorb clock skew.
const START_GRACE_MINUTES: i64 = 5;

/// Prices a rental. A promo that is expired, inactive or below its minimum
/// booking value is left out of the quote rather than rejected.
pub fn quote_rental(
    config: &BackendConfig,
    bike: &BikeSummary,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    promo: Option<&PromoRecord>,
    now: DateTime<Utc>,
) -> Result<PriceQuote, Vec<&'static str>> {
    let mut errors = Vec::new();
    if start_time < now - Duration::minutes(START_GRACE_MINUTES) {
        errors.push("Start time cannot be in the past");
    }
    let hours = rental_rate::rental_hours(start_time, end_time);
    if hours.is_none() {
        errors.push("End time must be after start time");
    }
    let Some(hours) = hours.filter(|_| errors.is_empty()) else {
        return Err(errors);
    };

    let original = rental_rate::original_amount(bike.price_per_hour, hours);
    let eligible = promo.filter(|p| p.is_usable_at(now) && original >= p.min_booking_value);

    let discount = eligible
        .map(|p| promo::discount_for(p.discount_type, p.discount_value, p.max_discount_amount, original))
        .unwrap_or(0.0);
    let taxes = rental_rate::taxes_and_fees(original, discount, config.tax_rate);

    Ok(PriceQuote {
        bike_id: bike.id.clone(),
        bike_name: bike.name.clone(),
        start_time,
        end_time,
        duration_hours: hours,
        original_amount: original,
        promo_applied: eligible.map(|p| AppliedPromo {
            code: p.code.clone(),
            description: p.description.clone(),
            discount_applied: discount,
        }),
        promo_code_id: eligible.map(|p| p.id.clone()),
        discount_amount: discount,
        taxes_and_fees: taxes,
        final_amount: rental_rate::final_amount(original, discount, taxes),
        currency: config.currency.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Db;

    fn window(now: DateTime<Utc>, hours: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = now + Duration::days(1);
        (start, start + Duration::hours(hours))
    }

    #[test]
    fn quote_without_promo_holds_the_invariant() {
        let db = Db::seeded(BackendConfig::default());
        let bike = db.bike("3").unwrap().summary;
        let now = Utc::now();
        let (start, end) = window(now, 2);

        let quote = quote_rental(db.config(), &bike, start, end, None, now).unwrap();
        assert_eq!(quote.original_amount, 500.0);
        assert_eq!(quote.discount_amount, 0.0);
        assert!(quote.promo_applied.is_none());
        assert_eq!(quote.final_amount, quote.original_amount - quote.discount_amount + quote.taxes_and_fees);
    }

    #[test]
    fn promo_below_minimum_is_silently_dropped() {
        let db = Db::seeded(BackendConfig::default());
        let bike = db.bike("2").unwrap().summary;
        let promo = db.promo_by_code("FLAT100").unwrap();
        let now = Utc::now();
        let (start, end) = window(now, 2);

        let quote = quote_rental(db.config(), &bike, start, end, Some(&promo), now).unwrap();
        assert!(quote.promo_applied.is_none());
        assert!(quote.promo_code_id.is_none());
        assert_eq!(quote.discount_amount, 0.0);
    }

    #[test]
    fn full_discount_is_free() {
        let db = Db::seeded(BackendConfig::default());
        let bike = db.bike("3").unwrap().summary;
        let promo = db.promo_by_code("FREERIDE").unwrap();
        let now = Utc::now();
        let (start, end) = window(now, 2);

        let quote = quote_rental(db.config(), &bike, start, end, Some(&promo), now).unwrap();
        assert_eq!(quote.final_amount, 0.0);
        assert_eq!(quote.taxes_and_fees, 0.0);
    }

    #[test]
    fn reversed_window_is_a_validation_error() {
        let db = Db::seeded(BackendConfig::default());
        let bike = db.bike("3").unwrap().summary;
        let now = Utc::now();
        let (start, end) = window(now, 2);

        let errors = quote_rental(db.config(), &bike, end, start, None, now).unwrap_err();
        assert_eq!(errors, vec!["End time must be after start time"]);
    }
}
