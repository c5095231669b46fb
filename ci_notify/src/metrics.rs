//! Metrics for notification engine observability.
//!
//! The exporter is installed by whichever binary hosts this crate; the
//! library only records through the `metrics` facade.

use metrics::counter;

/// Record a build matching a topic during chain evaluation.
pub fn build_classified(topic: &str) {
    counter!("notify_builds_classified_total", "topic" => topic.to_string()).increment(1);
}

/// Record a composed notification and the number of topics it covers.
pub fn notification_composed(topic_count: usize) {
    counter!("notify_notifications_composed_total").increment(1);
    counter!("notify_notification_topics_total").increment(topic_count as u64);
}

/// Record a build excluded from a notification.
pub fn notification_skipped(reason: &str) {
    counter!("notify_builds_skipped_total", "reason" => reason.to_string()).increment(1);
}
