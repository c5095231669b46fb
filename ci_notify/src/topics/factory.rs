//! Assembles a topic chain from a subscriber's preferences.

use serde::{Deserialize, Serialize};

use crate::topics::{Topic, TopicKind};

/// Which topic kinds a subscriber wants to hear about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionPreferences {
    pub build_errors: bool,
    pub build_warnings: bool,
    pub configure_failures: bool,
    pub dynamic_analysis: bool,
    pub labels: bool,
    pub test_failures: bool,
    pub missing_tests: bool,
    pub update_errors: bool,
}

impl SubscriptionPreferences {
    /// Every topic kind enabled.
    pub fn all() -> Self {
        Self {
            build_errors: true,
            build_warnings: true,
            configure_failures: true,
            dynamic_analysis: true,
            labels: true,
            test_failures: true,
            missing_tests: true,
            update_errors: true,
        }
    }

    pub fn any(&self) -> bool {
        self.build_errors
            || self.build_warnings
            || self.configure_failures
            || self.dynamic_analysis
            || self.labels
            || self.test_failures
            || self.missing_tests
            || self.update_errors
    }
}

/// Build the chain for a set of preferences, outermost node first, in
/// canonical kind order. Returns `None` when no kind is enabled.
pub fn build_chain(preferences: &SubscriptionPreferences) -> Option<Topic> {
    let enabled: Vec<TopicKind> = [
        (preferences.build_errors, TopicKind::build_error as fn() -> TopicKind),
        (preferences.build_warnings, TopicKind::build_warning),
        (preferences.configure_failures, TopicKind::configure),
        (preferences.dynamic_analysis, TopicKind::dynamic_analysis),
        (preferences.labels, TopicKind::labeled),
        (preferences.test_failures, TopicKind::test_failure),
        (preferences.missing_tests, TopicKind::test_missing),
        (preferences.update_errors, TopicKind::update_error),
    ]
    .into_iter()
    .filter_map(|(enabled, kind)| enabled.then(kind))
    .collect();

    if enabled.is_empty() {
        tracing::debug!("no topic kinds enabled, skipping chain");
        return None;
    }

    let mut chain: Option<Topic> = None;
    for kind in enabled.into_iter().rev() {
        let node = Topic::new(kind);
        chain = Some(match chain {
            Some(inner) => node.with_inner(inner),
            None => node,
        });
    }

    let chain = chain?;
    tracing::debug!(depth = chain.nodes().count(), "assembled topic chain");
    Some(chain)
}
