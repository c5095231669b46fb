//! Labeled topic — builds carrying labels a subscriber cares about.

use crate::collections::LabelCollection;
use crate::models::build::Build;
use crate::models::subscriber::Subscriber;
use crate::topics::TopicItem;

/// Matches build labels against the subscriber's declared interests. A
/// subscriber with no declared interests (or no subscriber at all) matches
/// every label.
#[derive(Debug, Default)]
pub struct LabeledTopic {
    pub(crate) items: Vec<TopicItem>,
    labels: LabelCollection,
}

impl LabeledTopic {
    pub const DESCRIPTION: &'static str = "Labeled submissions";

    pub(crate) fn set_topic_data(
        &mut self,
        build: &Build,
        subscriber: Option<&dyn Subscriber>,
    ) -> usize {
        let mut count = 0;
        for label in &build.labels {
            if Self::label_is_of_interest(label, subscriber) {
                self.labels.add(label);
                self.items.push(TopicItem::Label(label.clone()));
                count += 1;
            }
        }
        count
    }

    pub(crate) fn item_matches(
        _build: &Build,
        item: &TopicItem,
        subscriber: Option<&dyn Subscriber>,
    ) -> bool {
        matches!(item, TopicItem::Label(label) if Self::label_is_of_interest(label, subscriber))
    }

    fn label_is_of_interest(label: &str, subscriber: Option<&dyn Subscriber>) -> bool {
        match subscriber {
            Some(subscriber) if !subscriber.labels().is_empty() => {
                subscriber.labels().iter().any(|l| l == label)
            }
            _ => true,
        }
    }

    /// De-duplicated labels across every matching build, first-seen order.
    pub fn labels(&self) -> Vec<String> {
        self.labels.to_vec()
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["Submissions labeled {labels}", "{items}"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subscriber::EmailSubscriber;

    #[test]
    fn test_labels_deduplicate_across_builds() {
        let mut topic = LabeledTopic::default();

        let mut first = Build::new(1, "Project", "linux-gcc");
        first.labels.push("flaky".to_string());
        let mut second = Build::new(2, "Project", "linux-clang");
        second.labels.push("flaky".to_string());

        assert_eq!(topic.set_topic_data(&first, None), 1);
        assert_eq!(topic.set_topic_data(&second, None), 1);

        assert_eq!(topic.labels(), vec!["flaky"]);
        assert_eq!(topic.items.len(), 2);
    }

    #[test]
    fn test_subscriber_interests_narrow_matches() {
        let subscriber =
            EmailSubscriber::new("dev@example.com").with_labels(vec!["nightly".to_string()]);

        let mut build = Build::new(1, "Project", "linux-gcc");
        build.labels.push("flaky".to_string());
        build.labels.push("nightly".to_string());

        let mut topic = LabeledTopic::default();
        assert_eq!(topic.set_topic_data(&build, Some(&subscriber)), 1);
        assert_eq!(topic.labels(), vec!["nightly"]);
    }
}
