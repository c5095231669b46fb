//! Notification services — rendering and hand-off to delivery.

pub mod notification_service;

pub use notification_service::{compose, dispatch, Notification, NotificationSink};
