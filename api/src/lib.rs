//! Client side of the analytics backend: the two query endpoints, their wire
//! types and the error type shared by the dashboard cards.

mod client;
mod error;
mod wire;

pub use client::{prompt_url, QueryClient};
pub use error::{ApiError, FETCH_FAILED_MESSAGE, UNKNOWN_ERROR_MESSAGE};
pub use wire::{ChartConfig, ChartResponse, FieldList};
