//! Notification recipients.

use serde::{Deserialize, Serialize};

/// An addressable notification recipient.
///
/// The chain checks the address against each build's notification history;
/// label interests narrow what the labeled topic matches.
pub trait Subscriber {
    fn address(&self) -> &str;

    /// Labels the subscriber cares about. Empty means every label.
    fn labels(&self) -> &[String] {
        &[]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSubscriber {
    address: String,
    labels: Vec<String>,
}

impl EmailSubscriber {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            labels: Vec::new(),
        }
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

impl Subscriber for EmailSubscriber {
    fn address(&self) -> &str {
        &self.address
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
