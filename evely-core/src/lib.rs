//! Core library for the EVELY home page and the EventHub admin dashboard.
//!
//! All state lives in a key-value [`store::Store`] holding JSON text:
//! - `event`, `user`, `session`, `credentials` model the stored records
//! - `repository` and `sync` keep the event list in step with storage
//! - `stats` aggregates an event list
//! - `pages` ties them together into the two page models

pub mod catalog;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod event;
pub mod pages;
pub mod repository;
pub mod route;
pub mod session;
pub mod stats;
pub mod store;
pub mod sync;
pub mod user;

pub use error::{EvelyError, EvelyResult};
