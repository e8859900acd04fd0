use chrono::Utc;
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::api::{authenticate, with_db};
use crate::db::{Db, PromoRecord};
use crate::helper_model::ApiEnvelope;
use crate::methods;
use crate::model::PromoOffer;

fn to_offer(promo: PromoRecord) -> PromoOffer {
    PromoOffer {
        id: promo.code.clone(),
        validity: promo.expires_at.map(|exp| format!("Valid till {}", exp.format("%d %b %Y"))),
        description: if promo.description.trim().is_empty() {
            methods::promo::describe(promo.discount_type, promo.discount_value, promo.max_discount_amount)
        } else {
            promo.description
        },
        code: promo.code,
        discount_type: promo.discount_type,
        discount_value: promo.discount_value,
        min_booking_value: promo.min_booking_value,
        max_discount_amount: promo.max_discount_amount,
    }
}

pub fn main(db: Db) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("available")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_db(db))
        .and_then(async move |auth: Option<String>, db: Db| {
            if let Err(reply) = authenticate(&db, auth) {
                return reply;
            }
            let offers: Vec<PromoOffer> = db.usable_promos(Utc::now()).into_iter().map(to_offer).collect();
            methods::standard_replies::response_with_obj(ApiEnvelope::ok(offers), StatusCode::OK)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiscountType;

    fn record(description: &str) -> PromoRecord {
        PromoRecord {
            id: String::from("promo-9"),
            code: String::from("MONSOON30"),
            description: description.to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 30.0,
            min_booking_value: 200.0,
            max_discount_amount: Some(150.0),
            expires_at: None,
            is_active: true,
        }
    }

    #[test]
    fn offers_are_keyed_by_code() {
        let offer = to_offer(record("Monsoon special"));
        assert_eq!(offer.id, "MONSOON30");
        assert_eq!(offer.description, "Monsoon special");
        assert_eq!(offer.validity, None);
    }

    #[test]
    fn blank_description_falls_back_to_discount_terms() {
        let offer = to_offer(record("  "));
        assert_eq!(offer.description, "30% off up to ₹150");
    }
}
