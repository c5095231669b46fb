//! Test-failure topic — builds with failing test records.

use crate::models::build::Build;
use crate::models::test_record::TestStatus;
use crate::topics::TopicItem;

/// Accumulates failing tests across added builds. Tests failing on a
/// build's immediate parent that pass on the build itself are tracked as
/// fixed.
#[derive(Debug, Default)]
pub struct TestFailureTopic {
    pub(crate) items: Vec<TopicItem>,
    pub(crate) fixed: Vec<TopicItem>,
}

impl TestFailureTopic {
    pub const DESCRIPTION: &'static str = "Failing tests";

    pub(crate) fn set_topic_data(&mut self, build: &Build) -> usize {
        let before = self.items.len();
        self.items.extend(
            build
                .tests
                .iter()
                .filter(|t| t.status == TestStatus::Failed)
                .cloned()
                .map(TopicItem::Test),
        );

        if let Some(parent) = build.parent.as_deref() {
            for test in parent.tests.iter().filter(|t| t.status == TestStatus::Failed) {
                let now_passing = build
                    .tests
                    .iter()
                    .any(|t| t.name == test.name && t.status == TestStatus::Passed);
                if now_passing {
                    self.fixed.push(TopicItem::Test(test.clone()));
                }
            }
        }

        self.items.len() - before
    }

    pub(crate) fn item_matches(_build: &Build, item: &TopicItem) -> bool {
        matches!(item, TopicItem::Test(test) if test.status == TestStatus::Failed)
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["{count} failing test(s) for {builds}", "{items}"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_record::TestRecord;
    use std::sync::Arc;

    #[test]
    fn test_collects_failing_tests_only() {
        let mut build = Build::new(1, "Project", "linux-gcc");
        build.tests.push(TestRecord::new(1, "math.add", TestStatus::Failed));
        build.tests.push(TestRecord::new(2, "math.sub", TestStatus::Passed));
        build.tests.push(TestRecord::new(3, "math.mul", TestStatus::NotRun));

        let mut topic = TestFailureTopic::default();
        assert_eq!(topic.set_topic_data(&build), 1);
        assert_eq!(topic.items[0].describe(), "math.add");
    }

    #[test]
    fn test_parent_failures_now_passing_are_fixed() {
        let mut parent = Build::new(1, "Project", "linux-gcc");
        for (id, name) in [(1, "io.read"), (2, "io.write"), (3, "io.seek")] {
            parent.tests.push(TestRecord::new(id, name, TestStatus::Failed));
        }

        let mut build = Build::new(2, "Project", "linux-gcc");
        for (id, name) in [(4, "io.read"), (5, "io.write"), (6, "io.seek")] {
            build.tests.push(TestRecord::new(id, name, TestStatus::Passed));
        }
        build.parent = Some(Arc::new(parent));

        let mut topic = TestFailureTopic::default();
        assert_eq!(topic.set_topic_data(&build), 0);
        assert_eq!(topic.fixed.len(), 3);
    }
}
