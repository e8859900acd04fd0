use regex::Regex;

use crate::error::{BookingError, Result};
use crate::methods::rental_rate::round_currency;
use crate::model::{DiscountType, PriceQuote};

/// Trims and upper-cases a user-typed code; malformed codes never reach the
/// server.
pub fn normalize_code(raw: &str) -> Result<String> {
    lazy_static::lazy_static! {
        static ref PROMO_REGEX: Regex = Regex::new(r"^[A-Z0-9]{3,20}$").expect("Invalid promo code regex");
    }
    let code = raw.trim().to_uppercase();
    if PROMO_REGEX.is_match(&code) {
        Ok(code)
    } else {
        Err(BookingError::PromoNotApplied { code: raw.trim().to_string() })
    }
}

/// The pricing endpoint drops `promoApplied` for codes it will not honour
/// instead of rejecting them, so a requested code that is missing from the
/// quote means the code is invalid.
pub fn ensure_promo_applied(requested: &str, quote: &PriceQuote) -> Result<()> {
    match &quote.promo_applied {
        Some(applied) if applied.code.eq_ignore_ascii_case(requested) => Ok(()),
        _ => Err(BookingError::PromoNotApplied { code: requested.to_string() }),
    }
}

pub fn discount_for(
    discount_type: DiscountType,
    discount_value: f64,
    max_discount_amount: Option<f64>,
    booking_value: f64,
) -> f64 {
    let raw = match discount_type {
        DiscountType::Percentage => booking_value * discount_value / 100.0,
        DiscountType::Fixed => discount_value,
    };
    let capped = match max_discount_amount {
        Some(max) => raw.min(max),
        None => raw,
    };
    round_currency(capped.clamp(0.0, booking_value))
}

pub fn describe(discount_type: DiscountType, discount_value: f64, max_discount_amount: Option<f64>) -> String {
    match (discount_type, max_discount_amount) {
        (DiscountType::Percentage, Some(max)) => format!("{}% off up to ₹{}", discount_value, max),
        (DiscountType::Percentage, None) => format!("{}% off", discount_value),
        (DiscountType::Fixed, _) => format!("Flat ₹{} off", discount_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppliedPromo;

    fn quote(applied: Option<&str>) -> PriceQuote {
        PriceQuote {
            bike_id: "3".into(),
            bike_name: "Yamaha MT-07".into(),
            start_time: "2026-10-20T10:00:00Z".parse().unwrap(),
            end_time: "2026-10-20T12:00:00Z".parse().unwrap(),
            duration_hours: 2.0,
            original_amount: 500.0,
            promo_applied: applied.map(|code| AppliedPromo {
                code: code.into(),
                description: "50% off up to ₹100".into(),
                discount_applied: 100.0,
            }),
            promo_code_id: applied.map(|_| "promo-1".into()),
            discount_amount: if applied.is_some() { 100.0 } else { 0.0 },
            taxes_and_fees: 90.0,
            final_amount: if applied.is_some() { 490.0 } else { 590.0 },
            currency: "INR".into(),
        }
    }

    #[test]
    fn codes_are_normalized() {
        assert_eq!(normalize_code("  bikya50 ").unwrap(), "BIKYA50");
    }

    #[test]
    fn malformed_code_names_itself() {
        let err = normalize_code("no spaces!").unwrap_err();
        assert!(err.to_string().contains("no spaces!"));
        assert!(normalize_code("AB").is_err());
    }

    #[test]
    fn missing_promo_in_quote_is_rejected() {
        let err = ensure_promo_applied("INVALID1", &quote(None)).unwrap_err();
        assert!(err.to_string().contains("INVALID1"));
    }

    #[test]
    fn different_promo_in_quote_is_rejected() {
        assert!(ensure_promo_applied("FLAT100", &quote(Some("BIKYA50"))).is_err());
        assert!(ensure_promo_applied("BIKYA50", &quote(Some("BIKYA50"))).is_ok());
    }

    #[test]
    fn percentage_discount_is_capped() {
        assert_eq!(discount_for(DiscountType::Percentage, 50.0, Some(100.0), 500.0), 100.0);
        assert_eq!(discount_for(DiscountType::Percentage, 50.0, Some(100.0), 150.0), 75.0);
        assert_eq!(discount_for(DiscountType::Percentage, 100.0, None, 500.0), 500.0);
    }

    #[test]
    fn fixed_discount_never_exceeds_booking() {
        assert_eq!(discount_for(DiscountType::Fixed, 100.0, None, 500.0), 100.0);
        assert_eq!(discount_for(DiscountType::Fixed, 100.0, None, 60.0), 60.0);
    }

    #[test]
    fn descriptions_spell_out_the_terms() {
        assert_eq!(describe(DiscountType::Fixed, 100.0, None), "Flat ₹100 off");
        assert_eq!(describe(DiscountType::Percentage, 20.0, None), "20% off");
    }
}
