//! In-memory data behind the mock backend, seeded with the placeholder
//! catalog the app was built against.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::BackendConfig;
use crate::model::{BikeSummary, BookingStatus, DiscountType, User};

#[derive(Debug, Clone)]
pub struct BikeRecord {
    pub summary: BikeSummary,
    pub available: bool,
}

#[derive(Debug, Clone)]
pub struct PromoRecord {
    pub id: String,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub min_booking_value: f64,
    pub max_discount_amount: Option<f64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl PromoRecord {
    pub fn is_usable_at(&self, at: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.is_none_or(|exp| exp > at)
    }
}

#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub id: String,
    pub reference: String,
    pub user_id: String,
    pub bike_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub promo_id: Option<String>,
    pub final_amount: f64,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub status: BookingStatus,
}

#[derive(Debug, Default)]
pub struct Tables {
    pub bikes: HashMap<String, BikeRecord>,
    pub users: HashMap<String, User>,
    /// bearer token -> user id
    pub access_tokens: HashMap<String, String>,
    pub promos: Vec<PromoRecord>,
    pub bookings: HashMap<String, BookingRecord>,
}

#[derive(Clone)]
pub struct Db {
    tables: Arc<Mutex<Tables>>,
    config: Arc<BackendConfig>,
}

impl Db {
    pub fn new(config: BackendConfig) -> Self {
        Db { tables: Arc::new(Mutex::new(Tables::default())), config: Arc::new(config) }
    }

    pub fn seeded(config: BackendConfig) -> Self {
        let db = Db::new(config);
        {
            let mut tables = db.lock();
            seed(&mut tables, Utc::now());
        }
        db
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// A poisoned lock still holds consistent data: every write below is a
    /// single insert or field update.
    pub fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn user_for_token(&self, token: &str) -> Option<User> {
        let tables = self.lock();
        let user_id = tables.access_tokens.get(token)?;
        tables.users.get(user_id).cloned()
    }

    pub fn bike(&self, bike_id: &str) -> Option<BikeRecord> {
        self.lock().bikes.get(bike_id).cloned()
    }

    pub fn promo_by_code(&self, code: &str) -> Option<PromoRecord> {
        self.lock().promos.iter().find(|p| p.code.eq_ignore_ascii_case(code)).cloned()
    }

    pub fn promo_by_id(&self, promo_id: &str) -> Option<PromoRecord> {
        self.lock().promos.iter().find(|p| p.id == promo_id).cloned()
    }

    pub fn usable_promos(&self, at: DateTime<Utc>) -> Vec<PromoRecord> {
        self.lock().promos.iter().filter(|p| p.is_usable_at(at)).cloned().collect()
    }

    pub fn insert_booking(&self, booking: BookingRecord) {
        self.lock().bookings.insert(booking.id.clone(), booking);
    }

    pub fn booking(&self, booking_id: &str) -> Option<BookingRecord> {
        self.lock().bookings.get(booking_id).cloned()
    }

    pub fn mark_paid(&self, booking_id: &str, payment_id: &str) -> Option<BookingRecord> {
        let mut tables = self.lock();
        let booking = tables.bookings.get_mut(booking_id)?;
        booking.status = BookingStatus::Confirmed;
        booking.payment_id = Some(payment_id.to_string());
        Some(booking.clone())
    }
}

pub fn generate_booking_reference() -> String {
    let charset: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::rng();
    let tail: String = (0..8)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect();
    format!("BK{}", tail)
}

fn bike(id: &str, name: &str, year: i32, gear_type: &str, mileage: &str, rating: f64, price_per_hour: f64) -> BikeRecord {
    BikeRecord {
        summary: BikeSummary {
            id: id.to_string(),
            name: name.to_string(),
            year,
            image_url: format!("https://images.bikya.in/bikes/{}.jpg", id),
            gear_type: gear_type.to_string(),
            mileage: mileage.to_string(),
            rating,
            price_per_hour,
        },
        available: true,
    }
}

fn seed(tables: &mut Tables, now: DateTime<Utc>) {
    let bikes = vec![
        bike("1", "Royal Enfield Classic 350", 2022, "Manual", "35 km/l", 4.5, 180.0),
        bike("2", "Honda Activa 6G", 2023, "Automatic", "50 km/l", 4.2, 60.0),
        bike("3", "Yamaha MT-07", 2021, "Manual", "25 km/l", 4.7, 250.0),
        BikeRecord { available: false, ..bike("4", "KTM Duke 390", 2022, "Manual", "28 km/l", 4.6, 220.0) },
    ];
    for b in bikes {
        tables.bikes.insert(b.summary.id.clone(), b);
    }

    let user = User {
        id: String::from("u-1001"),
        name: String::from("Aarav Sharma"),
        email: String::from("aarav.sharma@bikya.in"),
        phone: String::from("9876543210"),
    };
    tables.access_tokens.insert(String::from("demo-token"), user.id.clone());
    tables.users.insert(user.id.clone(), user);

    tables.promos = vec![
        PromoRecord {
            id: String::from("promo-1"),
            code: String::from("BIKYA50"),
            description: String::from("50% off your ride, up to ₹100"),
            discount_type: DiscountType::Percentage,
            discount_value: 50.0,
            min_booking_value: 300.0,
            max_discount_amount: Some(100.0),
            expires_at: Some(now + Duration::days(90)),
            is_active: true,
        },
        PromoRecord {
            id: String::from("promo-2"),
            code: String::from("FLAT100"),
            description: String::from("Flat ₹100 off on rides above ₹500"),
            discount_type: DiscountType::Fixed,
            discount_value: 100.0,
            min_booking_value: 500.0,
            max_discount_amount: None,
            expires_at: Some(now + Duration::days(30)),
            is_active: true,
        },
        PromoRecord {
            id: String::from("promo-3"),
            code: String::from("FREERIDE"),
            description: String::from("Your first ride is on us"),
            discount_type: DiscountType::Percentage,
            discount_value: 100.0,
            min_booking_value: 0.0,
            max_discount_amount: None,
            expires_at: None,
            is_active: true,
        },
        PromoRecord {
            id: String::from("promo-4"),
            code: String::from("SUMMER20"),
            description: String::from("20% off summer rides"),
            discount_type: DiscountType::Percentage,
            discount_value: 20.0,
            min_booking_value: 0.0,
            max_discount_amount: Some(200.0),
            expires_at: Some(now - Duration::days(10)),
            is_active: true,
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_has_the_mt07() {
        let db = Db::seeded(BackendConfig::default());
        let mt07 = db.bike("3").unwrap();
        assert_eq!(mt07.summary.name, "Yamaha MT-07");
        assert_eq!(mt07.summary.price_per_hour, 250.0);
        assert!(db.user_for_token("demo-token").is_some());
        assert!(db.user_for_token("nope").is_none());
    }

    #[test]
    fn expired_promos_are_not_usable() {
        let db = Db::seeded(BackendConfig::default());
        let codes: Vec<String> = db.usable_promos(Utc::now()).into_iter().map(|p| p.code).collect();
        assert!(codes.contains(&"BIKYA50".to_string()));
        assert!(!codes.contains(&"SUMMER20".to_string()));
        assert!(db.promo_by_code("bikya50").is_some());
    }

    #[test]
    fn booking_references_are_prefixed() {
        let reference = generate_booking_reference();
        assert!(reference.starts_with("BK"));
        assert_eq!(reference.len(), 10);
    }
}
