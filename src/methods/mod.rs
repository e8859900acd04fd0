pub mod error_mapping;
pub mod promo;
pub mod rental_rate;
pub mod signature;
pub mod standard_replies;
pub mod tokens;
