//! Error types for the notification engine.

use thiserror::Error;

/// Errors surfaced by the topic chain and notification composition.
///
/// Classification itself never fails: a build that cannot be matched
/// against a topic simply does not belong to it. Errors are reserved for
/// misuse of the chain's lifecycle.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A notified-state check ran before a subscriber was assigned to the
    /// chain. Answering `false` here could send duplicate notifications,
    /// so the check refuses instead.
    #[error("no subscriber set on topic chain (topic: {topic})")]
    SubscriberNotSet {
        /// Name of the outermost topic the check was invoked on.
        topic: String,
    },
}
