//! Core types for countdown.
//!
//! This crate provides everything behind the `countdown` terminal app:
//! - `event` for stored events and the create payload
//! - `view_model` for turning stored events into display-ready rows
//! - `store` for the REST event store
//! - `session` for bearer-token lookup
//! - `controller` for form state and add/delete/load interactions

pub mod config;
pub mod controller;
pub mod date;
pub mod error;
pub mod event;
pub mod session;
pub mod store;
pub mod view_model;

pub use event::{Event, NewEvent};
