//! Showtime lookup turn: by movie (optionally filtered by cinema) or by
//! cinema.

use tracing::{info, warn};

use crate::application::render::{self, CinemaGroup, ShowtimeLine};
use crate::application::turn::{TurnContext, TurnOutcome};
use crate::domain::dates::{self, DATE_FORMAT};
use crate::domain::{names, ShowtimeRecord};
use crate::ports::{ApiError, BookingApi};

use super::{resolver, CONNECTION_TEXT, TIMEOUT_TEXT};

/// Entry point for the showtime-lookup intent.
pub async fn get_showtimes(api: &dyn BookingApi, ctx: &TurnContext) -> TurnOutcome {
    let movie_name = ctx.slots.text(names::MOVIE_NAME);
    let cinema_name = ctx.slots.text(names::CINEMA_NAME);
    let date = dates::parse_show_date(ctx.slots.text(names::DATE).as_deref(), ctx.today);

    info!(?movie_name, ?cinema_name, %date, "showtime lookup");

    match (movie_name, cinema_name) {
        (Some(movie), cinema) => by_movie(api, &movie, cinema.as_deref(), date).await,
        (None, Some(cinema)) => by_cinema(api, &cinema, date).await,
        (None, None) => TurnOutcome::reply(
            "Bạn muốn xem lịch chiếu của phim nào? \
             Hoặc bạn muốn xem lịch chiếu tại rạp nào?",
        ),
    }
}

async fn by_movie(
    api: &dyn BookingApi,
    movie_name: &str,
    cinema_filter: Option<&str>,
    date: chrono::NaiveDate,
) -> TurnOutcome {
    let Some(resolved) = resolver::resolve_movie(api, movie_name).await else {
        return TurnOutcome::reply(format!(
            "❌ Không tìm thấy phim '{movie_name}' trong hệ thống.\n\
             Vui lòng kiểm tra lại tên phim."
        ));
    };

    let showtimes = match api.showtimes_by_movie(&resolved.id).await {
        Ok(showtimes) => showtimes,
        Err(ApiError::Timeout { .. }) => return TurnOutcome::reply(TIMEOUT_TEXT),
        Err(ApiError::Connection(_)) => return TurnOutcome::reply(CONNECTION_TEXT),
        Err(ApiError::Status { .. }) => {
            return TurnOutcome::reply(format!(
                "Không thể lấy thông tin lịch chiếu cho phim '{movie_name}'."
            ));
        }
        Err(err) => {
            warn!(error = %err, movie = movie_name, "showtime fetch failed");
            return TurnOutcome::reply("Không có dữ liệu lịch chiếu.");
        }
    };

    // The schedule response's own movie block wins; the catalog record fills
    // in when the backend omits it.
    let movie = if showtimes.movie.title.is_empty() {
        resolved
    } else {
        showtimes.movie.clone()
    };

    if showtimes.entries.is_empty() {
        return TurnOutcome::reply(format!(
            "Hiện tại chưa có lịch chiếu cho phim '{movie_name}'."
        ));
    }

    let entries: Vec<&ShowtimeRecord> = match cinema_filter {
        Some(filter) => {
            let needle = filter.to_lowercase();
            let filtered: Vec<&ShowtimeRecord> = showtimes
                .entries
                .iter()
                .filter(|entry| {
                    entry
                        .cinema_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                })
                .collect();
            if filtered.is_empty() {
                return TurnOutcome::reply(format!(
                    "Phim '{movie_name}' không chiếu tại rạp '{filter}'."
                ));
            }
            filtered
        }
        None => showtimes.entries.iter().collect(),
    };

    // Unparseable timestamps are skipped, never fatal.
    let parseable: Vec<(&ShowtimeRecord, chrono::DateTime<chrono::Utc>)> = entries
        .iter()
        .filter_map(|entry| {
            let raw = entry.start_time.as_deref()?;
            match dates::parse_start_timestamp(raw) {
                Some(start) => Some((*entry, start)),
                None => {
                    warn!(showtime_id = %entry.id, start_time = raw, "unparseable start time");
                    None
                }
            }
        })
        .collect();

    let on_date: Vec<_> = parseable
        .iter()
        .filter(|(_, start)| start.date_naive() == date)
        .cloned()
        .collect();

    // Nothing on the requested date: show the whole schedule instead of an
    // empty reply.
    let (selected, fallback_date) = if on_date.is_empty() {
        info!(%date, "no showtimes on requested date, showing all dates");
        (parseable, Some(date))
    } else {
        (on_date, None)
    };

    if selected.is_empty() {
        return TurnOutcome::reply("Không tìm thấy lịch chiếu phù hợp.");
    }

    TurnOutcome::reply(render::movie_showtimes(
        &movie,
        &group_by_cinema(&selected),
        fallback_date,
    ))
}

/// Groups entries per cinema in first-seen order, each group sorted by start
/// time ascending.
fn group_by_cinema(
    entries: &[(&ShowtimeRecord, chrono::DateTime<chrono::Utc>)],
) -> Vec<CinemaGroup> {
    let mut groups: Vec<CinemaGroup> = Vec::new();
    for (entry, start) in entries {
        let cinema = entry
            .cinema_name
            .clone()
            .unwrap_or_else(|| "Rạp không xác định".to_string());
        let line = ShowtimeLine {
            id: entry.id.clone(),
            room: entry.room_name.clone().unwrap_or_else(|| "N/A".to_string()),
            start: *start,
        };
        match groups.iter_mut().find(|group| group.cinema == cinema) {
            Some(group) => group.lines.push(line),
            None => groups.push(CinemaGroup {
                cinema,
                lines: vec![line],
            }),
        }
    }
    for group in &mut groups {
        group.lines.sort_by_key(|line| line.start);
    }
    groups
}

async fn by_cinema(api: &dyn BookingApi, cinema_name: &str, date: chrono::NaiveDate) -> TurnOutcome {
    let Some(cinema) = resolver::resolve_cinema(api, cinema_name).await else {
        return TurnOutcome::reply(format!(
            "❌ Không tìm thấy rạp '{cinema_name}' trong hệ thống."
        ));
    };

    let entries = match api.showtimes_by_cinema(&cinema.id, date).await {
        Ok(entries) => entries,
        Err(ApiError::Timeout { .. }) => return TurnOutcome::reply(TIMEOUT_TEXT),
        Err(ApiError::Connection(_)) => return TurnOutcome::reply(CONNECTION_TEXT),
        Err(err) => {
            warn!(error = %err, cinema = cinema_name, "cinema schedule fetch failed");
            return TurnOutcome::reply(format!(
                "Không thể lấy thông tin lịch chiếu cho rạp '{cinema_name}'."
            ));
        }
    };

    if entries.is_empty() {
        return TurnOutcome::reply(format!(
            "Rạp '{cinema_name}' chưa có lịch chiếu vào ngày {}.",
            date.format(DATE_FORMAT)
        ));
    }

    // Group by movie title in first-seen order; the backend pre-sorts by
    // time within a movie.
    let mut groups: Vec<(String, Vec<crate::domain::CinemaProgramEntry>)> = Vec::new();
    for entry in entries {
        let title = entry
            .movie_title
            .clone()
            .unwrap_or_else(|| "Phim không xác định".to_string());
        match groups.iter_mut().find(|(name, _)| *name == title) {
            Some((_, list)) => list.push(entry),
            None => groups.push((title, vec![entry])),
        }
    }

    TurnOutcome::reply(render::cinema_showtimes(&cinema.name, date, &groups))
}
