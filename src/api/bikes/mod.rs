mod get;

use warp::Filter;

use crate::db::Db;

pub fn api_bikes(db: Db) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("bikes").and(get::main(db))
}
