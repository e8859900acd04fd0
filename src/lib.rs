//! Booking workflow client for the Bikya bike rental API: price quotes,
//! promo codes, booking creation and payment verification. The `api` and
//! `db` modules hold an in-memory stand-in for the backend.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod helper_model;
pub mod integration;
pub mod methods;
pub mod model;
pub mod store;
pub mod workflow;

pub use config::{BackendConfig, ClientConfig};
pub use error::{BookingError, Result};
pub use integration::BikyaClient;
pub use workflow::{BookingPhase, BookingSession, CheckoutOutcome};
