//! Centrix CI Notify — build notification engine for the Centrix CI platform.
//!
//! Classifies completed build submissions into notification topics (build
//! errors, warnings, configure failures, dynamic-analysis defects, label
//! matches, failing tests, missing tests, update errors), aggregates the
//! affected builds per topic, and composes subscriber-addressed
//! notifications for an external delivery sink.
//!
//! Persistence, HTTP, and delivery mechanics live elsewhere in the
//! platform. This crate only sees build data that has already been loaded,
//! and hands finished notifications to a [`services::NotificationSink`].

pub mod collections;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod topics;
