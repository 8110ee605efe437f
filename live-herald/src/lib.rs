//! Watches a roster of livestream channels and announces each one when it
//! goes live.

pub mod compose;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod notification;
pub mod roster;

pub use error::{Error, Result};
