//! Update-error topic — builds whose source checkout failed.

use crate::models::build::Build;
use crate::models::update::UpdateStatus;
use crate::topics::TopicItem;

#[derive(Debug, Default)]
pub struct UpdateErrorTopic {
    pub(crate) items: Vec<TopicItem>,
}

impl UpdateErrorTopic {
    pub const DESCRIPTION: &'static str = "Update errors";

    pub(crate) fn set_topic_data(&mut self, build: &Build) -> usize {
        match &build.update {
            Some(update) if update.status == UpdateStatus::Error => {
                self.items.push(TopicItem::Update(update.clone()));
                1
            }
            _ => 0,
        }
    }

    pub(crate) fn item_matches(_build: &Build, item: &TopicItem) -> bool {
        matches!(item, TopicItem::Update(update) if update.status == UpdateStatus::Error)
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["Source update failed for {builds}", "{items}"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::update::BuildUpdate;

    #[test]
    fn test_matches_failed_updates_only() {
        let mut build = Build::new(1, "Project", "linux-gcc");
        build.update = Some(BuildUpdate {
            revision: "abc123".to_string(),
            prior_revision: Some("def456".to_string()),
            status: UpdateStatus::Updated,
            files: vec!["src/lib.rs".to_string()],
        });

        let mut topic = UpdateErrorTopic::default();
        assert_eq!(topic.set_topic_data(&build), 0);

        build.update.as_mut().unwrap().status = UpdateStatus::Error;
        assert_eq!(topic.set_topic_data(&build), 1);
        assert_eq!(topic.items[0].describe(), "update to abc123 failed");
    }
}
