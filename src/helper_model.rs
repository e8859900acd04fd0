use serde_derive::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        ApiEnvelope { success: true, data: Some(data), message: None }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FieldError {
    pub msg: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn message(msg: &str) -> Self {
        ErrorResponse { message: Some(msg.to_string()), errors: None }
    }

    pub fn field_errors(msgs: &[&str]) -> Self {
        ErrorResponse {
            message: None,
            errors: Some(msgs.iter().map(|m| FieldError { msg: m.to_string() }).collect()),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct VerifyPaymentReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<crate::model::PaymentConfirmation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn envelope_without_data_decodes_to_none() {
        let envelope: ApiEnvelope<User> =
            serde_json::from_str(r#"{"success":false,"message":"Bike not found"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Bike not found"));
    }
}
