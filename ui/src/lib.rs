//! Shared UI crate for IAnalytics Flow: dashboard shell, insight and chart
//! cards, markdown rendering, export and localization.

pub mod chart;
pub mod components;
pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod insight;
pub mod markdown;
pub mod views;

pub use core::config::DashboardConfig;
