use chrono::Utc;
use tracing::{info, warn};
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

use crate::api::{authenticate, with_db};
use crate::db::{self, BookingRecord, Db};
use crate::methods;
use crate::methods::rental_rate::to_minor_units;
use crate::model::{
    BookingDetails, BookingStatus, CreateBookingParams, CreateBookingResponse, CreateBookingWire,
    FreeBooking, PaymentOrder, PaymentPrefill,
};

use super::pricing;

/// Largest difference tolerated between the client's total and ours.
const AMOUNT_TOLERANCE: f64 = 0.01;

pub fn main(db: Db) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path::end()
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_db(db))
        .and_then(async move |method: Method, body: CreateBookingParams, auth: Option<String>, db: Db| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            let user = match authenticate(&db, auth) {
                Ok(user) => user,
                Err(reply) => return reply,
            };
            let Some(bike) = db.bike(&body.bike_id) else {
                return methods::standard_replies::bike_not_found(&body.bike_id);
            };
            if !bike.available {
                return methods::standard_replies::bike_not_available(&bike.summary.name);
            }

            let promo = match body.promo_code_id.as_deref() {
                None => None,
                Some(promo_id) => match db.promo_by_id(promo_id) {
                    Some(promo) => Some(promo),
                    None => return methods::standard_replies::validation_failed(&["Promo code is no longer valid"]),
                },
            };

            let quote = match pricing::quote_rental(db.config(), &bike.summary, body.start_time, body.end_time, promo.as_ref(), Utc::now()) {
                Ok(quote) => quote,
                Err(errors) => return methods::standard_replies::validation_failed(&errors),
            };
            if promo.is_some() && quote.promo_applied.is_none() {
                return methods::standard_replies::validation_failed(&["Promo code is no longer valid"]);
            }
            if (quote.final_amount - body.final_amount_from_client).abs() > AMOUNT_TOLERANCE {
                warn!(
                    expected = quote.final_amount,
                    received = body.final_amount_from_client,
                    "client total does not match"
                );
                return methods::standard_replies::bad_request(&format!(
                    "Price has changed to {:.2}. Please review the updated amount.",
                    quote.final_amount
                ));
            }

            let booking_id = uuid::Uuid::new_v4().to_string();
            let reference = db::generate_booking_reference();
            let needs_payment = quote.final_amount > 0.0;
            let order_id = needs_payment.then(|| format!("order_{}", uuid::Uuid::new_v4().simple()));
            let status = if needs_payment { BookingStatus::PaymentPending } else { BookingStatus::Confirmed };

            db.insert_booking(BookingRecord {
                id: booking_id.clone(),
                reference: reference.clone(),
                user_id: user.id.clone(),
                bike_id: bike.summary.id.clone(),
                start_time: quote.start_time,
                end_time: quote.end_time,
                promo_id: quote.promo_code_id.clone(),
                final_amount: quote.final_amount,
                order_id: order_id.clone(),
                payment_id: None,
                status,
            });
            info!(booking_id = %booking_id, reference = %reference, needs_payment, "booking stored");

            let response = match order_id {
                Some(order_id) => CreateBookingResponse::PaymentRequired(PaymentOrder {
                    message: String::from("Booking created. Complete the payment to confirm it."),
                    booking_id,
                    booking_reference: reference,
                    razorpay_order_id: order_id,
                    razorpay_key_id: db.config().gateway_key_id.clone(),
                    amount: to_minor_units(quote.final_amount),
                    currency: quote.currency.clone(),
                    prefill: PaymentPrefill { name: user.name, email: user.email, contact: user.phone },
                }),
                None => CreateBookingResponse::NoPaymentRequired(FreeBooking {
                    message: String::from("Booking confirmed"),
                    booking_id,
                    booking_reference: reference,
                    booking_details: BookingDetails {
                        bike_id: quote.bike_id,
                        bike_name: quote.bike_name,
                        start_time: quote.start_time,
                        end_time: quote.end_time,
                        final_amount: quote.final_amount,
                        status,
                    },
                }),
            };
            methods::standard_replies::response_with_obj(CreateBookingWire::from(response), StatusCode::CREATED)
        })
}
