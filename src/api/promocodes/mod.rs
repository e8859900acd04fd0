mod available;

use warp::Filter;

use crate::db::Db;

pub fn api_promocodes(db: Db) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("promocodes").and(available::main(db))
}
