//! One place that turns an HTTP reply into either its decoded body or a
//! [`BookingError`]. Every outbound call in `integration` goes through here.

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{BookingError, Result};
use crate::helper_model::{ApiEnvelope, ErrorResponse};

/// Message precedence: `errors[].msg` joined with ", ", then `message`, then
/// the status text.
pub fn error_from_body(status: StatusCode, body: &[u8]) -> BookingError {
    let parsed: Option<ErrorResponse> = serde_json::from_slice(body).ok();

    let message = parsed
        .and_then(|err| {
            let joined = err
                .errors
                .map(|errors| {
                    errors
                        .into_iter()
                        .map(|e| e.msg)
                        .filter(|m| !m.is_empty())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .filter(|j| !j.is_empty());
            joined.or(err.message.filter(|m| !m.is_empty()))
        })
        .unwrap_or_else(|| status_text(status));

    BookingError::Request { status: status.as_u16(), message }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}

pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    if !status.is_success() {
        let err = error_from_body(status, body);
        warn!(status = status.as_u16(), error = %err, "request rejected");
        return Err(err);
    }
    serde_json::from_slice(body).map_err(|e| BookingError::InvalidResponse(e.to_string()))
}

/// Unwraps `{success, data}`; a `success: false` body is an error even on 2xx.
pub fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    let envelope: ApiEnvelope<T> = decode_body(status, body)?;
    if !envelope.success {
        let message = envelope.message.unwrap_or_else(|| status_text(status));
        return Err(BookingError::Request { status: status.as_u16(), message });
    }
    envelope
        .data
        .ok_or_else(|| BookingError::InvalidResponse(String::from("response is missing `data`")))
}

pub async fn read_response(response: reqwest::Response) -> Result<(StatusCode, Bytes)> {
    let status = response.status();
    let body = response.bytes().await?;
    Ok((status, body))
}

pub async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let (status, body) = read_response(response).await?;
    decode_body(status, &body)
}

pub async fn parse_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let (status, body) = read_response(response).await?;
    decode_envelope(status, &body)
}
