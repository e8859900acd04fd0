use chrono::Utc;
use tracing::debug;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

use crate::api::{authenticate, with_db};
use crate::db::Db;
use crate::helper_model::ApiEnvelope;
use crate::methods;
use crate::model::PriceCalculationParams;

use super::pricing;

pub fn main(db: Db) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("calculate-price")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_db(db))
        .and_then(async move |method: Method, body: PriceCalculationParams, auth: Option<String>, db: Db| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            if let Err(reply) = authenticate(&db, auth) {
                return reply;
            }
            let Some(bike) = db.bike(&body.bike_id) else {
                return methods::standard_replies::bike_not_found(&body.bike_id);
            };

            // Unknown codes fall through to an undiscounted quote.
            let promo = body.promo_code.as_deref().and_then(|code| db.promo_by_code(code.trim()));
            match pricing::quote_rental(db.config(), &bike.summary, body.start_time, body.end_time, promo.as_ref(), Utc::now()) {
                Ok(quote) => {
                    debug!(bike_id = %quote.bike_id, final_amount = quote.final_amount, "quote issued");
                    methods::standard_replies::response_with_obj(ApiEnvelope::ok(quote), StatusCode::OK)
                }
                Err(errors) => methods::standard_replies::validation_failed(&errors),
            }
        })
}
