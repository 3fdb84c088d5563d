//! Club Subscriptions - subscription lifecycle engine for gyms and clubs
//!
//! Derives subscription status from dates, freezes and cancellation, and
//! applies payments, freezes, renewals, cancellations and entry admission
//! behind storage-agnostic ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
