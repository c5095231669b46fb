//! Missing-test topic — builds with tests that never ran.

use crate::models::build::Build;
use crate::models::test_record::TestStatus;
use crate::topics::TopicItem;

#[derive(Debug, Default)]
pub struct TestMissingTopic {
    pub(crate) items: Vec<TopicItem>,
}

impl TestMissingTopic {
    pub const DESCRIPTION: &'static str = "Missing tests";

    pub(crate) fn set_topic_data(&mut self, build: &Build) -> usize {
        let before = self.items.len();
        self.items.extend(
            build
                .tests
                .iter()
                .filter(|t| t.status == TestStatus::NotRun)
                .cloned()
                .map(TopicItem::Test),
        );
        self.items.len() - before
    }

    pub(crate) fn item_matches(_build: &Build, item: &TopicItem) -> bool {
        matches!(item, TopicItem::Test(test) if test.status == TestStatus::NotRun)
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["{count} missing test(s) for {builds}", "{items}"]
    }
}
