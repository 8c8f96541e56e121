//! Platform-agnostic building blocks shared by the cards.

pub mod config;
pub mod export;
pub mod format;
pub mod request;
