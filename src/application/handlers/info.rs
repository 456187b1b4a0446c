//! Cinema and movie information turns.
//!
//! Both list the full catalog when no name slot is given, or the substring
//! matches when one is.

use tracing::warn;

use crate::application::render;
use crate::application::turn::{TurnContext, TurnOutcome};
use crate::domain::names;
use crate::ports::{ApiError, BookingApi};

use super::{CONNECTION_TEXT, TIMEOUT_TEXT};

/// Entry point for the cinema-information intent.
pub async fn get_cinema_info(api: &dyn BookingApi, ctx: &TurnContext) -> TurnOutcome {
    let cinemas = match api.cinemas().await {
        Ok(cinemas) => cinemas,
        Err(ApiError::Timeout { .. }) => return TurnOutcome::reply(TIMEOUT_TEXT),
        Err(ApiError::Connection(_)) => return TurnOutcome::reply(CONNECTION_TEXT),
        Err(ApiError::Malformed(reason)) => {
            warn!(reason, "malformed cinema catalog");
            return TurnOutcome::reply("Định dạng dữ liệu không hợp lệ.");
        }
        Err(err) => {
            warn!(error = %err, "cinema catalog fetch failed");
            return TurnOutcome::reply("Không thể lấy thông tin rạp.");
        }
    };

    let cinemas = match ctx.slots.text(names::CINEMA_NAME) {
        Some(name) => {
            let needle = name.to_lowercase();
            cinemas
                .into_iter()
                .filter(|cinema| cinema.name.to_lowercase().contains(&needle))
                .collect()
        }
        None => cinemas,
    };

    if cinemas.is_empty() {
        return TurnOutcome::reply(
            "❌ Không tìm thấy rạp phù hợp.\n\
             Vui lòng thử lại với tên rạp khác.",
        );
    }

    TurnOutcome::reply(render::cinema_info(&cinemas))
}

/// Entry point for the movie-information intent.
pub async fn get_movie_info(api: &dyn BookingApi, ctx: &TurnContext) -> TurnOutcome {
    let movies = match api.movies().await {
        Ok(movies) => movies,
        Err(ApiError::Timeout { .. }) => return TurnOutcome::reply(TIMEOUT_TEXT),
        Err(ApiError::Connection(_)) => return TurnOutcome::reply(CONNECTION_TEXT),
        Err(ApiError::Malformed(reason)) => {
            warn!(reason, "malformed movie catalog");
            return TurnOutcome::reply("Định dạng dữ liệu không hợp lệ.");
        }
        Err(err) => {
            warn!(error = %err, "movie catalog fetch failed");
            return TurnOutcome::reply("Không thể lấy thông tin phim.");
        }
    };

    let movies = match ctx.slots.text(names::MOVIE_NAME) {
        Some(name) => {
            let needle = name.to_lowercase();
            movies
                .into_iter()
                .filter(|movie| movie.title.to_lowercase().contains(&needle))
                .collect()
        }
        None => movies,
    };

    if movies.is_empty() {
        return TurnOutcome::reply(
            "❌ Không tìm thấy phim phù hợp.\n\
             Vui lòng thử lại với tên phim khác.",
        );
    }

    TurnOutcome::reply(render::movie_info(&movies))
}
