use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use crate::error::BookingError;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BikeSummary {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub image_url: String,
    pub gear_type: String,
    pub mileage: String,
    pub rating: f64,
    pub price_per_hour: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalculationParams {
    pub bike_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPromo {
    pub code: String,
    pub description: String,
    pub discount_applied: f64,
}

/// Quote returned by the pricing endpoint. The amounts are the server's and
/// are never recomputed on the client.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub bike_id: String,
    pub bike_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub original_amount: f64,
    #[serde(default)]
    pub promo_applied: Option<AppliedPromo>,
    #[serde(default)]
    pub promo_code_id: Option<String>,
    pub discount_amount: f64,
    pub taxes_and_fees: f64,
    pub final_amount: f64,
    pub currency: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingParams {
    pub bike_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub promo_code_id: Option<String>,
    pub final_amount_from_client: f64,
}

impl CreateBookingParams {
    pub fn from_quote(quote: &PriceQuote) -> Self {
        CreateBookingParams {
            bike_id: quote.bike_id.clone(),
            start_time: quote.start_time,
            end_time: quote.end_time,
            promo_code_id: quote.promo_code_id.clone(),
            final_amount_from_client: quote.final_amount,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub message: String,
    pub booking_id: String,
    pub booking_reference: String,
    pub razorpay_order_id: String,
    pub razorpay_key_id: String,
    /// Minor currency units (paise).
    pub amount: i64,
    pub currency: String,
    pub prefill: PaymentPrefill,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub bike_id: String,
    pub bike_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub final_amount: f64,
    pub status: BookingStatus,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreeBooking {
    pub message: String,
    pub booking_id: String,
    pub booking_reference: String,
    pub booking_details: BookingDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateBookingResponse {
    PaymentRequired(PaymentOrder),
    NoPaymentRequired(FreeBooking),
}

impl CreateBookingResponse {
    pub fn booking_id(&self) -> &str {
        match self {
            CreateBookingResponse::PaymentRequired(order) => &order.booking_id,
            CreateBookingResponse::NoPaymentRequired(free) => &free.booking_id,
        }
    }

    pub fn booking_reference(&self) -> &str {
        match self {
            CreateBookingResponse::PaymentRequired(order) => &order.booking_reference,
            CreateBookingResponse::NoPaymentRequired(free) => &free.booking_reference,
        }
    }
}

/// Wire form of the create-booking reply; the payment group is told apart
/// from the free-booking form by field presence only.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingWire {
    pub message: String,
    pub booking_id: String,
    pub booking_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub razorpay_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub razorpay_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefill: Option<PaymentPrefill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_details: Option<BookingDetails>,
}

impl TryFrom<CreateBookingWire> for CreateBookingResponse {
    type Error = BookingError;

    fn try_from(wire: CreateBookingWire) -> Result<Self, Self::Error> {
        let payment_fields = [
            wire.razorpay_order_id.is_some(),
            wire.razorpay_key_id.is_some(),
            wire.amount.is_some(),
            wire.currency.is_some(),
            wire.prefill.is_some(),
        ];
        let present = payment_fields.iter().filter(|p| **p).count();

        match (present, wire.booking_details) {
            (5, None) => Ok(CreateBookingResponse::PaymentRequired(PaymentOrder {
                message: wire.message,
                booking_id: wire.booking_id,
                booking_reference: wire.booking_reference,
                razorpay_order_id: wire.razorpay_order_id.unwrap_or_default(),
                razorpay_key_id: wire.razorpay_key_id.unwrap_or_default(),
                amount: wire.amount.unwrap_or_default(),
                currency: wire.currency.unwrap_or_default(),
                prefill: wire.prefill.unwrap_or_default(),
            })),
            (0, Some(details)) => Ok(CreateBookingResponse::NoPaymentRequired(FreeBooking {
                message: wire.message,
                booking_id: wire.booking_id,
                booking_reference: wire.booking_reference,
                booking_details: details,
            })),
            (0, None) => Err(BookingError::InvalidResponse(
                "booking response carries neither a payment order nor booking details".into(),
            )),
            (n, _) => Err(BookingError::InvalidResponse(format!(
                "booking response mixes payment and free-booking fields ({} of 5 payment fields)",
                n
            ))),
        }
    }
}

impl From<CreateBookingResponse> for CreateBookingWire {
    fn from(response: CreateBookingResponse) -> Self {
        match response {
            CreateBookingResponse::PaymentRequired(order) => CreateBookingWire {
                message: order.message,
                booking_id: order.booking_id,
                booking_reference: order.booking_reference,
                razorpay_order_id: Some(order.razorpay_order_id),
                razorpay_key_id: Some(order.razorpay_key_id),
                amount: Some(order.amount),
                currency: Some(order.currency),
                prefill: Some(order.prefill),
                booking_details: None,
            },
            CreateBookingResponse::NoPaymentRequired(free) => CreateBookingWire {
                message: free.message,
                booking_id: free.booking_id,
                booking_reference: free.booking_reference,
                booking_details: Some(free.booking_details),
                ..Default::default()
            },
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    PaymentPending,
    Confirmed,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaymentParams {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "bookingId")]
    pub booking_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub booking_id: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromoOffer {
    /// Display identifier; always equal to `code` once fetched.
    #[serde(default)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub min_booking_value: f64,
    #[serde(default)]
    pub max_discount_amount: Option<f64>,
    #[serde(default)]
    pub validity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: serde_json::Value) -> Result<CreateBookingResponse, BookingError> {
        let wire: CreateBookingWire = serde_json::from_value(value).unwrap();
        CreateBookingResponse::try_from(wire)
    }

    #[test]
    fn payment_shaped_response() {
        let response = wire(json!({
            "message": "Booking created, proceed to payment",
            "bookingId": "b-1",
            "bookingReference": "BK7Q2M9XZA",
            "razorpayOrderId": "order_1",
            "razorpayKeyId": "rzp_test_bikya",
            "amount": 59000,
            "currency": "INR",
            "prefill": {"name": "Aarav Sharma", "email": "aarav@bikya.in", "contact": "9876543210"}
        }))
        .unwrap();
        match response {
            CreateBookingResponse::PaymentRequired(order) => {
                assert_eq!(order.amount, 59000);
                assert_eq!(order.razorpay_order_id, "order_1");
            }
            other => panic!("expected payment order, got {:?}", other),
        }
    }

    #[test]
    fn free_booking_response() {
        let response = wire(json!({
            "message": "Booking confirmed",
            "bookingId": "b-2",
            "bookingReference": "BK00000001",
            "bookingDetails": {
                "bikeId": "3",
                "bikeName": "Yamaha MT-07",
                "startTime": "2026-10-20T10:00:00Z",
                "endTime": "2026-10-20T12:00:00Z",
                "finalAmount": 0.0,
                "status": "Confirmed"
            }
        }))
        .unwrap();
        assert!(matches!(response, CreateBookingResponse::NoPaymentRequired(_)));
        assert_eq!(response.booking_reference(), "BK00000001");
    }

    #[test]
    fn mixed_response_is_rejected() {
        let err = wire(json!({
            "message": "Booking created",
            "bookingId": "b-3",
            "bookingReference": "BK00000002",
            "razorpayOrderId": "order_3",
            "amount": 100
        }))
        .unwrap_err();
        assert!(matches!(err, BookingError::InvalidResponse(_)));
    }

    #[test]
    fn price_params_omit_missing_promo() {
        let params = PriceCalculationParams {
            bike_id: "3".into(),
            start_time: "2026-10-20T10:00:00Z".parse().unwrap(),
            end_time: "2026-10-20T12:00:00Z".parse().unwrap(),
            promo_code: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["bikeId"], "3");
        assert!(value.get("promoCode").is_none());
    }

    #[test]
    fn verify_params_keep_gateway_field_names() {
        let params = VerifyPaymentParams {
            razorpay_payment_id: "pay_1".into(),
            razorpay_order_id: "order_1".into(),
            razorpay_signature: "sig".into(),
            booking_id: "b-1".into(),
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["razorpay_payment_id"], "pay_1");
        assert_eq!(value["bookingId"], "b-1");
    }
}
