//! Cinebot - Movie Ticket Booking Assistant Fulfillment
//!
//! This crate implements the fulfillment layer behind a conversational
//! ticket-booking assistant: it receives action requests from the dialogue
//! engine, orchestrates calls to the cinema booking backend, and renders
//! human-readable replies plus slot-mutation events.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
