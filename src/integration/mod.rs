pub mod bike_catalog;
pub mod bikya_api;
pub mod checkout;
pub mod user_profile;

pub use bikya_api::BikyaClient;
