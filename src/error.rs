use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Not authorized: no token found. Please log in again.")]
    AuthenticationMissing,

    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Promo code '{code}' is invalid or not applicable to this booking.")]
    PromoNotApplied { code: String },

    #[error("Payment Verification Failed: {0}")]
    PaymentVerification(String),

    #[error("Payment failed: {description} (code {code})")]
    PaymentGateway { code: i32, description: String },

    #[error("{0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;

impl BookingError {
    pub fn http_status(&self) -> Option<u16> {
        match self {
            BookingError::Request { status, .. } => Some(*status),
            BookingError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Alert title shown by the booking screens.
    pub fn alert_title(&self) -> &'static str {
        match self {
            BookingError::AuthenticationMissing => "Authentication Required",
            BookingError::PromoNotApplied { .. } => "Invalid Promo Code",
            BookingError::PaymentVerification(_) => "Payment Verification Failed",
            BookingError::PaymentGateway { .. } => "Payment Failed",
            _ => "Booking Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promo_error_names_the_code() {
        let err = BookingError::PromoNotApplied { code: "INVALID1".to_string() };
        assert!(err.to_string().contains("INVALID1"));
        assert_eq!(err.alert_title(), "Invalid Promo Code");
    }

    #[test]
    fn request_error_displays_server_message() {
        let err = BookingError::Request { status: 400, message: "End time must be after start time".into() };
        assert_eq!(err.to_string(), "End time must be after start time");
        assert_eq!(err.http_status(), Some(400));
    }
}
