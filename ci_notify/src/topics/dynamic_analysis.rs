//! Dynamic-analysis topic — builds with failed checker results.

use crate::models::build::Build;
use crate::models::dynamic_analysis::DynamicAnalysisStatus;
use crate::topics::TopicItem;

#[derive(Debug, Default)]
pub struct DynamicAnalysisTopic {
    pub(crate) items: Vec<TopicItem>,
}

impl DynamicAnalysisTopic {
    pub const DESCRIPTION: &'static str = "Dynamic analysis defects";

    pub(crate) fn set_topic_data(&mut self, build: &Build) -> usize {
        let before = self.items.len();
        self.items.extend(
            build
                .dynamic_analyses
                .iter()
                .filter(|a| a.status == DynamicAnalysisStatus::Failed)
                .cloned()
                .map(TopicItem::DynamicAnalysis),
        );
        self.items.len() - before
    }

    pub(crate) fn item_matches(_build: &Build, item: &TopicItem) -> bool {
        matches!(
            item,
            TopicItem::DynamicAnalysis(analysis)
                if analysis.status == DynamicAnalysisStatus::Failed
        )
    }

    pub(crate) fn template() -> Vec<&'static str> {
        vec!["{count} dynamic analysis defect(s) for {builds}", "{items}"]
    }
}
