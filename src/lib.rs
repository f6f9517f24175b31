//! EURO MOTORS website service.
//!
//! Server-rendered, multilingual pages for the car repair shop with a live
//! "open now" status computed in the shop's timezone.

pub mod availability;
pub mod config;
pub mod consent;
pub mod i18n;
pub mod instagram;
pub mod pages;
pub mod scheduler;
pub mod server;
pub mod services;
