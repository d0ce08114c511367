//! # Okorok
//!
//! Recipe catalog helpers for the Okorok recipe-sharing site.
//!
//! ## Architecture
//!
//! - **duration**: Free-text preparation time normalization and time buckets
//! - **models**: Recipe records as served by the recipe API
//! - **catalog**: Search and filter groups over recipe lists
//! - **storage**: Loading and exporting recipe collections
//! - **config**: Configuration loading and validation

pub mod catalog;
pub mod config;
pub mod duration;
pub mod models;
pub mod storage;

pub use duration::{parse_duration_to_minutes, resolve_duration, DurationBucket, Resolution};
pub use models::*;
