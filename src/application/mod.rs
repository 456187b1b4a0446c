//! Application layer - fulfillment orchestration per conversational turn.

pub mod handlers;
pub mod render;
pub mod slot_recovery;
pub mod turn;

pub use handlers::ActionDispatcher;
pub use turn::{BotMessage, TurnContext, TurnOutcome};
