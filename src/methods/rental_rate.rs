use chrono::{DateTime, TimeDelta, Utc};

pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Minor units (paise) for the checkout widget.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Started hours are billed in full, with a one hour minimum.
pub fn billable_hours(raw_duration: TimeDelta) -> f64 {
    let minutes = raw_duration.num_minutes().max(0);
    let hours = (minutes + 59) / 60;
    hours.max(1) as f64
}

pub fn rental_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<f64> {
    if end <= start {
        return None;
    }
    Some(billable_hours(end - start))
}

pub fn original_amount(price_per_hour: f64, hours: f64) -> f64 {
    round_currency(price_per_hour * hours)
}

/// Taxes are charged on the undiscounted rental and waived only when the
/// discount covers it entirely.
pub fn taxes_and_fees(original: f64, discount: f64, tax_rate: f64) -> f64 {
    if discount >= original {
        0.0
    } else {
        round_currency(original * tax_rate)
    }
}

pub fn final_amount(original: f64, discount: f64, taxes: f64) -> f64 {
    round_currency((original - discount + taxes).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn partial_hours_round_up() {
        assert_eq!(billable_hours(Duration::minutes(120)), 2.0);
        assert_eq!(billable_hours(Duration::minutes(121)), 3.0);
        assert_eq!(billable_hours(Duration::minutes(10)), 1.0);
    }

    #[test]
    fn empty_or_reversed_window_is_rejected() {
        let start: DateTime<Utc> = "2026-10-20T10:00:00Z".parse().unwrap();
        assert_eq!(rental_hours(start, start), None);
        assert_eq!(rental_hours(start, start - Duration::hours(1)), None);
        assert_eq!(rental_hours(start, start + Duration::hours(2)), Some(2.0));
    }

    #[test]
    fn two_hours_on_the_mt07() {
        let original = original_amount(250.0, 2.0);
        let taxes = taxes_and_fees(original, 0.0, 0.18);
        assert_eq!(original, 500.0);
        assert_eq!(taxes, 90.0);
        assert_eq!(final_amount(original, 0.0, taxes), 590.0);
    }

    #[test]
    fn full_discount_waives_taxes() {
        assert_eq!(taxes_and_fees(500.0, 500.0, 0.18), 0.0);
        assert_eq!(final_amount(500.0, 500.0, 0.0), 0.0);
    }

    #[test]
    fn minor_units() {
        assert_eq!(to_minor_units(590.0), 59000);
        assert_eq!(to_minor_units(472.5), 47250);
    }
}
