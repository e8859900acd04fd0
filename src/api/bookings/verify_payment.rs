use tracing::{info, warn};
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::api::{authenticate, with_db};
use crate::db::Db;
use crate::helper_model::VerifyPaymentReply;
use crate::methods;
use crate::methods::signature::verify_payment_signature;
use crate::model::{BookingStatus, PaymentConfirmation, VerifyPaymentParams};

pub fn main(db: Db) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("verify-payment")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_db(db))
        .and_then(async move |body: VerifyPaymentParams, auth: Option<String>, db: Db| {
            let user = match authenticate(&db, auth) {
                Ok(user) => user,
                Err(reply) => return reply,
            };
            let booking = match db.booking(&body.booking_id) {
                Some(booking) if booking.user_id == user.id => booking,
                _ => return methods::standard_replies::booking_not_found(),
            };
            if booking.status == BookingStatus::Confirmed {
                return methods::standard_replies::booking_already_paid();
            }
            if booking.order_id.as_deref() != Some(body.razorpay_order_id.as_str()) {
                warn!(booking_id = %booking.id, "payment order does not belong to booking");
                return methods::standard_replies::payment_verification_failed("Order does not match this booking");
            }
            if !verify_payment_signature(
                &db.config().gateway_secret,
                &body.razorpay_order_id,
                &body.razorpay_payment_id,
                &body.razorpay_signature,
            ) {
                warn!(booking_id = %booking.id, "payment signature mismatch");
                return methods::standard_replies::payment_verification_failed("Invalid payment signature");
            }

            let Some(paid) = db.mark_paid(&booking.id, &body.razorpay_payment_id) else {
                return methods::standard_replies::booking_not_found();
            };
            info!(booking_id = %paid.id, reference = %paid.reference, "payment verified");
            let reply = VerifyPaymentReply {
                success: true,
                message: String::from("Payment verified successfully"),
                data: Some(PaymentConfirmation {
                    booking_id: paid.id,
                    status: paid.status,
                    message: format!("Booking {} confirmed", paid.reference),
                }),
            };
            methods::standard_replies::response_with_obj(reply, StatusCode::OK)
        })
}
