//! Build-warning topic — builds whose submissions contain warning alerts.

use crate::models::alert::AlertKind;
use crate::models::build::Build;
use crate::topics::TopicItem;

#[derive(Debug, Default)]
pub struct BuildWarningTopic {
    pub(crate) items: Vec<TopicItem>,
}

impl BuildWarningTopic {
    pub const DESCRIPTION: &'static str = "Build warnings";

    pub(crate) fn set_topic_data(&mut self, build: &Build) -> usize {
        let before = self.items.len();
        self.items
            .extend(build.warnings().cloned().map(TopicItem::Alert));
        self.items.len() - before
    }

    pub(crate) fn item_matches(_build: &Build, item: &TopicItem) -> bool {
        matches!(item, TopicItem::Alert(alert) if alert.kind == AlertKind::Warning)
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["{count} build warning(s) for {builds}", "{items}"]
    }
}
