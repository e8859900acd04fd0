//! The booking screen's orchestration: load the bike and user, quote,
//! optionally re-quote with a promo, create the booking and drive checkout.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{BookingError, Result};
use crate::integration::BikyaClient;
use crate::integration::checkout::{CheckoutOptions, PaymentWidget};
use crate::model::{
    BikeSummary, CreateBookingParams, CreateBookingResponse, FreeBooking, PaymentConfirmation,
    PriceCalculationParams, PriceQuote, PromoOffer,
};
use crate::store::BookingStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPhase {
    Idle,
    SummaryLoaded,
    PriceQuoted,
    BookingCreated,
    PaymentPending,
    PaymentVerified,
    PaymentFailed,
    FinalizedWithoutPayment,
}

impl BookingPhase {
    pub fn is_final(&self) -> bool {
        matches!(self, BookingPhase::PaymentVerified | BookingPhase::FinalizedWithoutPayment)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Paid(PaymentConfirmation),
    ConfirmedWithoutPayment(FreeBooking),
    /// The user closed the checkout; nothing is reported.
    Cancelled,
}

pub struct BookingSession<W> {
    client: BikyaClient,
    widget: W,
    store: BookingStore,
    phase: BookingPhase,
}

impl<W: PaymentWidget> BookingSession<W> {
    pub fn new(client: BikyaClient, widget: W) -> Self {
        BookingSession { client, widget, store: BookingStore::default(), phase: BookingPhase::Idle }
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub fn phase(&self) -> BookingPhase {
        self.phase
    }

    pub fn quote(&self) -> Option<&PriceQuote> {
        self.store.price.value()
    }

    /// Fresh screen mount.
    pub fn reset(&mut self) {
        self.store.reset();
        self.transition(BookingPhase::Idle);
    }

    fn transition(&mut self, next: BookingPhase) {
        if self.phase != next {
            info!(from = ?self.phase, to = ?next, "booking phase changed");
            self.phase = next;
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.phase.is_final() {
            return Err(BookingError::InvalidState(String::from(
                "This booking is already finalized",
            )));
        }
        if self.phase == BookingPhase::PaymentPending {
            return Err(BookingError::InvalidState(String::from(
                "A payment is already in progress",
            )));
        }
        Ok(())
    }

    /// Bike and user load concurrently into their own slots. Returns the
    /// bike, or `None` when it does not exist.
    pub async fn load_summary(&mut self, bike_id: &str) -> Result<Option<BikeSummary>> {
        let bike_ticket = self.store.bike.begin();
        let user_ticket = self.store.user.begin();

        let (bike, user) = tokio::join!(
            self.client.fetch_bike_summary(bike_id),
            self.client.fetch_user_profile()
        );

        self.store.bike.settle(bike_ticket, bike.as_ref().cloned());
        self.store.user.settle(user_ticket, user.as_ref().cloned());

        let bike = bike?;
        user?;
        if bike.is_some() && self.phase == BookingPhase::Idle {
            self.transition(BookingPhase::SummaryLoaded);
        }
        Ok(bike)
    }

    pub async fn load_promos(&mut self) -> Result<Vec<PromoOffer>> {
        let ticket = self.store.promos.begin();
        let result = self.client.fetch_available_promos().await;
        self.store.promos.settle(ticket, result.as_ref().cloned());
        result
    }

    pub async fn request_quote(
        &mut self,
        bike_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<PriceQuote> {
        self.ensure_open()?;
        let params = PriceCalculationParams {
            bike_id: bike_id.to_string(),
            start_time,
            end_time,
            promo_code: None,
        };
        self.run_quote(params).await
    }

    /// Re-quotes the current rental window with `code`. On rejection the
    /// previous quote stays in place.
    pub async fn apply_promo(&mut self, code: &str) -> Result<PriceQuote> {
        self.ensure_open()?;
        let mut params = self.current_window()?;
        params.promo_code = Some(code.to_string());
        self.run_quote(params).await
    }

    pub async fn remove_promo(&mut self) -> Result<PriceQuote> {
        self.ensure_open()?;
        let params = self.current_window()?;
        self.run_quote(params).await
    }

    fn current_window(&self) -> Result<PriceCalculationParams> {
        let quote = self.store.price.value().ok_or_else(|| {
            BookingError::InvalidState(String::from("Select a rental window before applying a promo"))
        })?;
        Ok(PriceCalculationParams {
            bike_id: quote.bike_id.clone(),
            start_time: quote.start_time,
            end_time: quote.end_time,
            promo_code: None,
        })
    }

    async fn run_quote(&mut self, params: PriceCalculationParams) -> Result<PriceQuote> {
        let ticket = self.store.price.begin();
        let result = if params.promo_code.is_some() {
            self.client.apply_promo_and_get_price(&params).await
        } else {
            self.client.calculate_price(&params).await
        };
        let accepted = self.store.price.settle(ticket, result.as_ref().cloned());

        if result.is_ok() && accepted {
            // A new quote invalidates any booking created from an older one.
            self.store.created_booking.reset();
            self.transition(BookingPhase::PriceQuoted);
        }
        result
    }

    /// Creates the booking from the current quote and, when payment is
    /// required, runs checkout and payment verification.
    pub async fn confirm(&mut self) -> Result<CheckoutOutcome> {
        self.ensure_open()?;
        let quote = self.store.price.value().cloned().ok_or_else(|| {
            BookingError::InvalidState(String::from("No price quote to confirm"))
        })?;

        let ticket = self.store.created_booking.begin();
        let created = self.client.create_booking(&CreateBookingParams::from_quote(&quote)).await;
        self.store.created_booking.settle(ticket, created.as_ref().cloned());
        let created = created?;
        self.transition(BookingPhase::BookingCreated);

        let order = match created {
            CreateBookingResponse::NoPaymentRequired(free) => {
                self.transition(BookingPhase::FinalizedWithoutPayment);
                return Ok(CheckoutOutcome::ConfirmedWithoutPayment(free));
            }
            CreateBookingResponse::PaymentRequired(order) => order,
        };

        self.transition(BookingPhase::PaymentPending);
        let description = format!("{} rental ({})", quote.bike_name, order.booking_reference);
        let options = CheckoutOptions::for_order(&order, &description);

        let paid = match self.widget.open(options).await {
            Ok(paid) => paid,
            Err(failure) if failure.is_user_cancellation() => {
                info!(booking_id = %order.booking_id, "checkout cancelled by user");
                self.store.created_booking.reset();
                self.transition(BookingPhase::PriceQuoted);
                return Ok(CheckoutOutcome::Cancelled);
            }
            Err(failure) => {
                warn!(code = failure.code, description = %failure.description, "checkout failed");
                let err = BookingError::PaymentGateway { code: failure.code, description: failure.description };
                let ticket = self.store.payment.begin();
                self.store.payment.settle(ticket, Err(&err));
                self.transition(BookingPhase::PaymentFailed);
                return Err(err);
            }
        };

        let ticket = self.store.payment.begin();
        let verified = self.client.verify_payment(&paid.into_verify_params(&order.booking_id)).await;
        self.store.payment.settle(ticket, verified.as_ref().cloned());

        match verified {
            Ok(confirmation) => {
                self.transition(BookingPhase::PaymentVerified);
                Ok(CheckoutOutcome::Paid(confirmation))
            }
            Err(err) => {
                warn!(booking_id = %order.booking_id, error = %err, "payment verification failed");
                self.transition(BookingPhase::PaymentFailed);
                Err(err)
            }
        }
    }
}
