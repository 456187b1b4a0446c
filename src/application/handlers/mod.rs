//! Fulfillment handlers, one per conversational intent.
//!
//! The dialogue engine names the action to run; [`ActionDispatcher`] routes
//! to the matching handler. Handlers never fail a turn: every error path
//! produces a user-facing reply.

pub mod booking;
pub mod info;
pub mod payment;
pub mod resolver;
pub mod seats;
pub mod showtimes;

use std::sync::Arc;

use tracing::warn;

use crate::application::turn::{TurnContext, TurnOutcome};
use crate::ports::BookingApi;

/// Shared reply text for a read timeout.
pub(crate) const TIMEOUT_TEXT: &str = "⏱️ Timeout khi kết nối API. Vui lòng thử lại.";
/// Shared reply text for a connection failure.
pub(crate) const CONNECTION_TEXT: &str = "❌ Lỗi kết nối API. Vui lòng kiểm tra backend server.";

/// Action names as registered with the dialogue engine.
pub mod actions {
    pub const GET_SHOWTIMES: &str = "action_get_showtimes";
    pub const GET_AVAILABLE_SEATS: &str = "action_get_available_seats";
    pub const CREATE_BOOKING: &str = "action_create_booking";
    pub const REDIRECT_TO_PAYMENT: &str = "action_redirect_to_payment";
    pub const GET_CINEMA_INFO: &str = "action_get_cinema_info";
    pub const GET_MOVIE_INFO: &str = "action_get_movie_info";
}

/// Routes named actions to their handlers.
pub struct ActionDispatcher {
    api: Arc<dyn BookingApi>,
    payment_base_url: String,
}

impl ActionDispatcher {
    pub fn new(api: Arc<dyn BookingApi>, payment_base_url: impl Into<String>) -> Self {
        Self {
            api,
            payment_base_url: payment_base_url.into(),
        }
    }

    /// Runs one fulfillment turn.
    pub async fn dispatch(&self, action: &str, ctx: &TurnContext) -> TurnOutcome {
        let api = self.api.as_ref();
        match action {
            actions::GET_SHOWTIMES => showtimes::get_showtimes(api, ctx).await,
            actions::GET_AVAILABLE_SEATS => seats::get_available_seats(api, ctx).await,
            actions::CREATE_BOOKING => booking::create_booking(api, ctx).await,
            actions::REDIRECT_TO_PAYMENT => {
                payment::redirect_to_payment(&self.payment_base_url, ctx)
            }
            actions::GET_CINEMA_INFO => info::get_cinema_info(api, ctx).await,
            actions::GET_MOVIE_INFO => info::get_movie_info(api, ctx).await,
            other => {
                warn!(action = other, "unknown action requested");
                TurnOutcome::reply("Xin lỗi, tôi chưa hỗ trợ yêu cầu này.")
            }
        }
    }
}
