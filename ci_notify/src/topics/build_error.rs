//! Build-error topic — builds whose submissions contain error alerts.

use std::collections::HashSet;

use crate::models::alert::AlertKind;
use crate::models::build::Build;
use crate::topics::TopicItem;

/// Accumulates error alerts across added builds. Also tracks errors that
/// were present on a build's immediate parent but are absent from the
/// build itself (resolved since the previous submission).
#[derive(Debug, Default)]
pub struct BuildErrorTopic {
    pub(crate) items: Vec<TopicItem>,
    pub(crate) fixed: Vec<TopicItem>,
}

impl BuildErrorTopic {
    pub const DESCRIPTION: &'static str = "Build errors";

    pub(crate) fn set_topic_data(&mut self, build: &Build) -> usize {
        let matched: Vec<_> = build.errors().cloned().collect();

        if let Some(parent) = build.parent.as_deref() {
            let current: HashSet<&str> = matched.iter().map(|a| a.text.as_str()).collect();
            for alert in parent.errors() {
                if !current.contains(alert.text.as_str()) {
                    self.fixed.push(TopicItem::Alert(alert.clone()));
                }
            }
        }

        let count = matched.len();
        self.items.extend(matched.into_iter().map(TopicItem::Alert));
        count
    }

    pub(crate) fn item_matches(_build: &Build, item: &TopicItem) -> bool {
        matches!(item, TopicItem::Alert(alert) if alert.kind == AlertKind::Error)
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["{count} build error(s) for {builds}", "{items}"]
    }
}
