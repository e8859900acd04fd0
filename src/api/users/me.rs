use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::api::{authenticate, with_db};
use crate::db::Db;
use crate::methods;

pub fn main(db: Db) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("me")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_db(db))
        .and_then(async move |auth: Option<String>, db: Db| {
            let user = match authenticate(&db, auth) {
                Ok(user) => user,
                Err(reply) => return reply,
            };
            methods::standard_replies::response_with_obj(user, StatusCode::OK)
        })
}
