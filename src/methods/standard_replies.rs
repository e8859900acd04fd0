use crate::helper_model;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub type WarpReply = Result<warp::reply::Response, Rejection>;

pub fn response_with_obj<T>(obj: T, status_code: StatusCode) -> WarpReply
where
    T: serde::Serialize,
{
    Ok(warp::reply::with_status(warp::reply::json(&obj), status_code).into_response())
}

fn message_reply(msg: &str, status_code: StatusCode) -> WarpReply {
    response_with_obj(helper_model::ErrorResponse::message(msg), status_code)
}

pub fn bad_request(err_msg: &str) -> WarpReply {
    message_reply(err_msg, StatusCode::BAD_REQUEST)
}

/// `{errors: [{msg}]}` validation reply.
pub fn validation_failed(msgs: &[&str]) -> WarpReply {
    response_with_obj(helper_model::ErrorResponse::field_errors(msgs), StatusCode::BAD_REQUEST)
}

pub fn not_authorized() -> WarpReply {
    message_reply("Not authorized, no token", StatusCode::UNAUTHORIZED)
}

pub fn token_invalid() -> WarpReply {
    message_reply("Not authorized, token failed", StatusCode::UNAUTHORIZED)
}

pub fn method_not_allowed_response() -> WarpReply {
    message_reply("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
}

pub fn bike_not_found(bike_id: &str) -> WarpReply {
    message_reply(&format!("Bike {} not found", bike_id), StatusCode::NOT_FOUND)
}

pub fn booking_not_found() -> WarpReply {
    message_reply("Booking not found", StatusCode::NOT_FOUND)
}

pub fn bike_not_available(bike_name: &str) -> WarpReply {
    message_reply(
        &format!("{} is not available for booking right now", bike_name),
        StatusCode::CONFLICT,
    )
}

pub fn booking_already_paid() -> WarpReply {
    message_reply("Booking already paid", StatusCode::CONFLICT)
}

pub fn payment_verification_failed(reason: &str) -> WarpReply {
    let body = helper_model::VerifyPaymentReply {
        success: false,
        message: reason.to_string(),
        data: None,
    };
    response_with_obj(body, StatusCode::BAD_REQUEST)
}
