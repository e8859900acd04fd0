use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{BookingError, Result};
use crate::helper_model::VerifyPaymentReply;
use crate::methods::{error_mapping, promo, tokens};
use crate::model::{
    CreateBookingParams, CreateBookingResponse, CreateBookingWire, PaymentConfirmation,
    PriceCalculationParams, PriceQuote, PromoOffer, VerifyPaymentParams,
};

/// HTTP client for the Bikya booking API. Cheap to clone.
#[derive(Clone)]
pub struct BikyaClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    pub(crate) tokens: Arc<dyn tokens::TokenProvider>,
}

impl BikyaClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn tokens::TokenProvider>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(BikyaClient { http, config, tokens })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn bearer(&self) -> Result<String> {
        tokens::require_token(self.tokens.as_ref()).map(|t| format!("Bearer {}", t))
    }

    pub async fn calculate_price(&self, params: &PriceCalculationParams) -> Result<PriceQuote> {
        let bearer = self.bearer()?;
        let url = self.config.endpoint("/bookings/calculate-price");
        debug!(bike_id = %params.bike_id, promo = ?params.promo_code, "calculating price");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, bearer)
            .json(params)
            .send()
            .await?;
        let quote: PriceQuote = error_mapping::parse_envelope(response).await?;
        debug!(final_amount = quote.final_amount, currency = %quote.currency, "price quoted");
        Ok(quote)
    }

    /// Same endpoint as [`calculate_price`](Self::calculate_price) but the
    /// quote must carry the requested promo.
    pub async fn apply_promo_and_get_price(&self, params: &PriceCalculationParams) -> Result<PriceQuote> {
        let raw = params
            .promo_code
            .as_deref()
            .ok_or_else(|| BookingError::InvalidState(String::from("No promo code given")))?;
        let code = promo::normalize_code(raw)?;
        let request = PriceCalculationParams { promo_code: Some(code.clone()), ..params.clone() };

        let quote = self.calculate_price(&request).await?;
        promo::ensure_promo_applied(&code, &quote)?;
        info!(code = %code, discount = quote.discount_amount, "promo applied");
        Ok(quote)
    }

    pub async fn fetch_available_promos(&self) -> Result<Vec<PromoOffer>> {
        let bearer = self.bearer()?;
        let url = self.config.endpoint("/promocodes/available");

        let response = self.http.get(&url).header(AUTHORIZATION, bearer).send().await?;
        let mut offers: Vec<PromoOffer> = error_mapping::parse_envelope(response).await?;
        for offer in offers.iter_mut() {
            offer.id = offer.code.clone();
        }
        debug!(count = offers.len(), "promos loaded");
        Ok(offers)
    }

    pub async fn create_booking(&self, params: &CreateBookingParams) -> Result<CreateBookingResponse> {
        let bearer = self.bearer()?;
        let url = self.config.endpoint("/bookings");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, bearer)
            .json(params)
            .send()
            .await?;
        let wire: CreateBookingWire = error_mapping::parse_json(response).await?;
        let created = CreateBookingResponse::try_from(wire)?;
        info!(
            booking_id = %created.booking_id(),
            payment_required = matches!(created, CreateBookingResponse::PaymentRequired(_)),
            "booking created"
        );
        Ok(created)
    }

    pub async fn verify_payment(&self, params: &VerifyPaymentParams) -> Result<PaymentConfirmation> {
        let bearer = self.bearer()?;
        let url = self.config.endpoint("/bookings/verify-payment");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, bearer)
            .json(params)
            .send()
            .await
            .map_err(|e| BookingError::PaymentVerification(e.to_string()))?;
        let reply: VerifyPaymentReply = error_mapping::parse_json(response)
            .await
            .map_err(|e| BookingError::PaymentVerification(e.to_string()))?;

        match (reply.success, reply.data) {
            (true, Some(mut confirmation)) => {
                if confirmation.message.is_empty() {
                    confirmation.message = reply.message;
                }
                info!(booking_id = %confirmation.booking_id, "payment verified");
                Ok(confirmation)
            }
            (true, None) => Err(BookingError::PaymentVerification(String::from(
                "server did not return the finalized booking",
            ))),
            (false, _) => Err(BookingError::PaymentVerification(reply.message)),
        }
    }
}
