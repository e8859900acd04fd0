//! Booking-screen state: one slot per request concern, each with its own
//! status and request ticket.
//!
//! A slot hands out a [`RequestTicket`] when a request is dispatched and only
//! accepts the result carrying the latest ticket. A slow response that
//! resolves after a newer request was issued is dropped instead of
//! overwriting fresher state.

use tracing::warn;

use crate::error::BookingError;
use crate::model::{BikeSummary, CreateBookingResponse, PaymentConfirmation, PriceQuote, PromoOffer, User};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone)]
pub struct RequestSlot<T> {
    status: RequestStatus,
    value: Option<T>,
    issued: u64,
    name: &'static str,
}

impl<T> RequestSlot<T> {
    pub fn new(name: &'static str) -> Self {
        RequestSlot { status: RequestStatus::Idle, value: None, issued: 0, name }
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.status = RequestStatus::Loading;
        RequestTicket(self.issued)
    }

    /// Returns `false` when the ticket is stale and the result was dropped.
    /// A failure keeps the last good value.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<T, &BookingError>) -> bool {
        if ticket.0 != self.issued {
            warn!(slot = self.name, ticket = ticket.0, latest = self.issued, "dropping stale response");
            return false;
        }
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.status = RequestStatus::Succeeded;
            }
            Err(err) => {
                self.status = RequestStatus::Failed(err.to_string());
            }
        }
        true
    }

    /// Back to `Idle` with no value. Tickets keep counting so results of
    /// requests issued before the reset are still dropped.
    pub fn reset(&mut self) {
        self.issued += 1;
        self.status = RequestStatus::Idle;
        self.value = None;
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            RequestStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingStore {
    /// `Some(None)` once loaded means the bike does not exist.
    pub bike: RequestSlot<Option<BikeSummary>>,
    pub user: RequestSlot<User>,
    pub price: RequestSlot<PriceQuote>,
    pub promos: RequestSlot<Vec<PromoOffer>>,
    pub created_booking: RequestSlot<CreateBookingResponse>,
    pub payment: RequestSlot<PaymentConfirmation>,
}

impl Default for BookingStore {
    fn default() -> Self {
        BookingStore {
            bike: RequestSlot::new("bike"),
            user: RequestSlot::new("user"),
            price: RequestSlot::new("price"),
            promos: RequestSlot::new("promos"),
            created_booking: RequestSlot::new("created_booking"),
            payment: RequestSlot::new("payment"),
        }
    }
}

impl BookingStore {
    pub fn reset(&mut self) {
        self.bike.reset();
        self.user.reset();
        self.price.reset();
        self.promos.reset();
        self.created_booking.reset();
        self.payment.reset();
    }

    pub fn is_busy(&self) -> bool {
        self.bike.is_loading()
            || self.user.is_loading()
            || self.price.is_loading()
            || self.promos.is_loading()
            || self.created_booking.is_loading()
            || self.payment.is_loading()
    }
}
