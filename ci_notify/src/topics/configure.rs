//! Configure topic — builds whose configure step failed.

use crate::models::build::Build;
use crate::topics::TopicItem;

#[derive(Debug, Default)]
pub struct ConfigureTopic {
    pub(crate) items: Vec<TopicItem>,
}

impl ConfigureTopic {
    pub const DESCRIPTION: &'static str = "Configure failures";

    pub(crate) fn set_topic_data(&mut self, build: &Build) -> usize {
        match &build.configure {
            Some(configure) if configure.failed() => {
                self.items.push(TopicItem::Configure(configure.clone()));
                1
            }
            _ => 0,
        }
    }

    pub(crate) fn item_matches(_build: &Build, item: &TopicItem) -> bool {
        matches!(item, TopicItem::Configure(configure) if configure.failed())
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["Configure failed for {builds}", "{items}"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configure::Configure;

    fn configure(status: i32, errors: u32) -> Configure {
        Configure {
            status,
            errors,
            warnings: 0,
            command: "cmake ..".to_string(),
            log_excerpt: None,
        }
    }

    #[test]
    fn test_matches_failed_configure_only() {
        let mut build = Build::new(1, "Project", "linux-gcc");

        let mut topic = ConfigureTopic::default();
        assert_eq!(topic.set_topic_data(&build), 0);

        build.configure = Some(configure(0, 0));
        assert_eq!(topic.set_topic_data(&build), 0);

        build.configure = Some(configure(1, 2));
        build.configure_errors = 2;
        assert_eq!(topic.set_topic_data(&build), 1);
        assert_eq!(topic.items.len(), 1);
    }
}
