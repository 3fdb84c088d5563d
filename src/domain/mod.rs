//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `subscription` - Subscription aggregate and its lifecycle rules

pub mod foundation;
pub mod subscription;
