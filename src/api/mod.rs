mod bikes;
mod bookings;
mod promocodes;
mod users;

use std::convert::Infallible;

use tracing::warn;
use warp::Filter;

use crate::db::Db;
use crate::methods;
use crate::methods::standard_replies::WarpReply;
use crate::model::User;

pub fn api(db: Db) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("api")
        .and(
            bookings::api_bookings(db.clone())
                .or(promocodes::api_promocodes(db.clone()))
                .or(bikes::api_bikes(db.clone()))
                .or(users::api_users(db)),
        )
        .and(warp::path::end())
        .with(warp::trace::request())
}

pub(crate) fn with_db(db: Db) -> impl Filter<Extract = (Db,), Error = Infallible> + Clone {
    warp::any().map(move || db.clone())
}

/// Resolves the bearer token to a user, or the 401 reply to send back.
pub(crate) fn authenticate(db: &Db, auth: Option<String>) -> Result<User, WarpReply> {
    let Some(token) = methods::tokens::bearer_from_header(auth.as_deref()) else {
        return Err(methods::standard_replies::not_authorized());
    };
    match db.user_for_token(&token) {
        Some(user) => Ok(user),
        None => {
            warn!("rejected unknown bearer token");
            Err(methods::standard_replies::token_invalid())
        }
    }
}
