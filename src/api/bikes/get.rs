use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::api::with_db;
use crate::db::Db;
use crate::methods;

pub fn main(db: Db) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path::param::<String>()
        .and(warp::path::end())
        .and(warp::get())
        .and(with_db(db))
        .and_then(async move |bike_id: String, db: Db| match db.bike(&bike_id) {
            Some(bike) => methods::standard_replies::response_with_obj(bike.summary, StatusCode::OK),
            None => methods::standard_replies::bike_not_found(&bike_id),
        })
}
