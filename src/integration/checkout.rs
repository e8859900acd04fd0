use std::future::Future;

use serde_derive::{Deserialize, Serialize};

use crate::model::{PaymentOrder, PaymentPrefill, VerifyPaymentParams};

/// Gateway error code for a checkout the user closed themselves.
pub const CANCELLED_BY_USER: i32 = 2;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOptions {
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub key: String,
    pub description: String,
    pub prefill: PaymentPrefill,
}

impl CheckoutOptions {
    pub fn for_order(order: &PaymentOrder, description: &str) -> Self {
        CheckoutOptions {
            amount: order.amount,
            currency: order.currency.clone(),
            order_id: order.razorpay_order_id.clone(),
            key: order.razorpay_key_id.clone(),
            description: description.to_string(),
            prefill: order.prefill.clone(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSuccess {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

impl CheckoutSuccess {
    pub fn into_verify_params(self, booking_id: &str) -> VerifyPaymentParams {
        VerifyPaymentParams {
            razorpay_payment_id: self.razorpay_payment_id,
            razorpay_order_id: self.razorpay_order_id,
            razorpay_signature: self.razorpay_signature,
            booking_id: booking_id.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFailure {
    pub code: i32,
    pub description: String,
}

impl CheckoutFailure {
    pub fn is_user_cancellation(&self) -> bool {
        self.code == CANCELLED_BY_USER
    }
}

/// The external checkout UI. Resolves with the signed payment triple or
/// rejects with the gateway's `{code, description}`.
pub trait PaymentWidget {
    fn open(&self, options: CheckoutOptions) -> impl Future<Output = Result<CheckoutSuccess, CheckoutFailure>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_code_two_is_a_cancellation() {
        let cancelled = CheckoutFailure { code: 2, description: "Payment cancelled by user".into() };
        let declined = CheckoutFailure { code: 0, description: "Card declined".into() };
        assert!(cancelled.is_user_cancellation());
        assert!(!declined.is_user_cancellation());
    }

    #[test]
    fn options_mirror_the_order() {
        let order = PaymentOrder {
            message: "Booking created".into(),
            booking_id: "b-1".into(),
            booking_reference: "BK1".into(),
            razorpay_order_id: "order_1".into(),
            razorpay_key_id: "rzp_test_bikya".into(),
            amount: 59000,
            currency: "INR".into(),
            prefill: PaymentPrefill { name: "Aarav".into(), email: "a@b.in".into(), contact: "9876543210".into() },
        };
        let options = CheckoutOptions::for_order(&order, "Yamaha MT-07 rental");
        assert_eq!(options.amount, 59000);
        assert_eq!(options.order_id, "order_1");
        assert_eq!(options.key, "rzp_test_bikya");
    }
}
