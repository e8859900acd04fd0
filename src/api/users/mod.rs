mod me;

use warp::Filter;

use crate::db::Db;

pub fn api_users(db: Db) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("users").and(me::main(db))
}
