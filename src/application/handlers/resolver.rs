//! Free-text entity resolution against the backend catalogs.
//!
//! Two-pass policy: exact case-insensitive match first, then substring in
//! either direction (query in candidate or candidate in query). The first
//! hit wins within a pass, in catalog order. Catalog fetch failures resolve
//! to "not found" rather than erroring the turn.

use tracing::warn;

use crate::domain::{CinemaRecord, MovieRecord};
use crate::ports::BookingApi;

/// Resolves a movie name to its catalog record.
pub async fn resolve_movie(api: &dyn BookingApi, name: &str) -> Option<MovieRecord> {
    let movies = match api.movies().await {
        Ok(movies) => movies,
        Err(err) => {
            warn!(error = %err, movie = name, "movie catalog fetch failed");
            return None;
        }
    };
    best_match(&movies, name, |movie: &MovieRecord| movie.title.as_str()).cloned()
}

/// Resolves a cinema name to its catalog record.
pub async fn resolve_cinema(api: &dyn BookingApi, name: &str) -> Option<CinemaRecord> {
    let cinemas = match api.cinemas().await {
        Ok(cinemas) => cinemas,
        Err(err) => {
            warn!(error = %err, cinema = name, "cinema catalog fetch failed");
            return None;
        }
    };
    best_match(&cinemas, name, |cinema: &CinemaRecord| cinema.name.as_str()).cloned()
}

/// Exact match beats substring match, catalog order breaks ties.
fn best_match<'a, T>(
    candidates: &'a [T],
    query: &str,
    name_of: impl for<'b> Fn(&'b T) -> &'b str,
) -> Option<&'a T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    if let Some(exact) = candidates
        .iter()
        .find(|candidate| name_of(candidate).to_lowercase() == query)
    {
        return Some(exact);
    }

    candidates.iter().find(|candidate| {
        let name = name_of(candidate).to_lowercase();
        !name.is_empty() && (name.contains(&query) || query.contains(&name))
    })
}
