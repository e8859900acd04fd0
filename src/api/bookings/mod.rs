mod calculate_price;
mod create;
mod pricing;
mod verify_payment;

use warp::Filter;

use crate::db::Db;

pub fn api_bookings(db: Db) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("bookings").and(
        calculate_price::main(db.clone())
            .or(verify_payment::main(db.clone()))
            .or(create::main(db)),
    )
}
