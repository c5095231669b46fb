//! Notification topics — classification and aggregation of build events.
//!
//! A topic chain is a linear sequence of nodes, each wrapping at most one
//! inner node. Every build fed to the outermost node is evaluated by each
//! node exactly once; nodes accumulate the builds that match their own
//! predicate into a private collection. Queries that a node cannot answer
//! itself (name, count, labels, fixed items, templates) delegate inward
//! and fall back to a neutral default at the end of the chain.
//!
//! The set of topic kinds is closed: classification dispatch is an
//! exhaustive match over [`TopicKind`].

pub mod build_error;
pub mod build_warning;
pub mod configure;
pub mod dynamic_analysis;
pub mod factory;
pub mod labeled;
pub mod test_failure;
pub mod test_missing;
pub mod update_error;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::collections::BuildCollection;
use crate::error::NotifyError;
use crate::models::alert::BuildAlert;
use crate::models::build::Build;
use crate::models::configure::Configure;
use crate::models::dynamic_analysis::DynamicAnalysis;
use crate::models::subscriber::Subscriber;
use crate::models::test_record::TestRecord;
use crate::models::update::BuildUpdate;

use self::build_error::BuildErrorTopic;
use self::build_warning::BuildWarningTopic;
use self::configure::ConfigureTopic;
use self::dynamic_analysis::DynamicAnalysisTopic;
use self::labeled::LabeledTopic;
use self::test_failure::TestFailureTopic;
use self::test_missing::TestMissingTopic;
use self::update_error::UpdateErrorTopic;

/// One unit of topic-relevant build data: the thing a predicate matches
/// and a notification lists.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicItem {
    Alert(BuildAlert),
    Configure(Configure),
    DynamicAnalysis(DynamicAnalysis),
    Test(TestRecord),
    Update(BuildUpdate),
    Label(String),
}

impl TopicItem {
    /// One-line rendering for notification bodies.
    pub fn describe(&self) -> String {
        match self {
            Self::Alert(alert) => match (&alert.source_file, alert.source_line) {
                (Some(file), Some(line)) => format!("{file}:{line}: {}", alert.text),
                (Some(file), None) => format!("{file}: {}", alert.text),
                _ => alert.text.clone(),
            },
            Self::Configure(configure) => format!(
                "configure exited with status {} ({} error(s))",
                configure.status, configure.errors
            ),
            Self::DynamicAnalysis(analysis) => {
                format!("{}: {}", analysis.checker, analysis.name)
            }
            Self::Test(test) => test.name.clone(),
            Self::Update(update) => format!("update to {} failed", update.revision),
            Self::Label(label) => label.clone(),
        }
    }
}

/// The closed set of topic kinds, each carrying its accumulated state.
#[derive(Debug)]
pub enum TopicKind {
    BuildError(BuildErrorTopic),
    BuildWarning(BuildWarningTopic),
    Configure(ConfigureTopic),
    DynamicAnalysis(DynamicAnalysisTopic),
    Labeled(LabeledTopic),
    TestFailure(TestFailureTopic),
    TestMissing(TestMissingTopic),
    UpdateError(UpdateErrorTopic),
}

impl TopicKind {
    pub const BUILD_ERROR: &'static str = "BuildError";
    pub const BUILD_WARNING: &'static str = "BuildWarning";
    pub const CONFIGURE: &'static str = "Configure";
    pub const DYNAMIC_ANALYSIS: &'static str = "DynamicAnalysis";
    pub const LABELED: &'static str = "Labeled";
    pub const TEST_FAILURE: &'static str = "TestFailure";
    pub const TEST_MISSING: &'static str = "TestMissing";
    pub const UPDATE_ERROR: &'static str = "UpdateError";

    pub fn build_error() -> Self {
        Self::BuildError(BuildErrorTopic::default())
    }

    pub fn build_warning() -> Self {
        Self::BuildWarning(BuildWarningTopic::default())
    }

    pub fn configure() -> Self {
        Self::Configure(ConfigureTopic::default())
    }

    pub fn dynamic_analysis() -> Self {
        Self::DynamicAnalysis(DynamicAnalysisTopic::default())
    }

    pub fn labeled() -> Self {
        Self::Labeled(LabeledTopic::default())
    }

    pub fn test_failure() -> Self {
        Self::TestFailure(TestFailureTopic::default())
    }

    pub fn test_missing() -> Self {
        Self::TestMissing(TestMissingTopic::default())
    }

    pub fn update_error() -> Self {
        Self::UpdateError(UpdateErrorTopic::default())
    }

    /// Fixed identity string of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BuildError(_) => Self::BUILD_ERROR,
            Self::BuildWarning(_) => Self::BUILD_WARNING,
            Self::Configure(_) => Self::CONFIGURE,
            Self::DynamicAnalysis(_) => Self::DYNAMIC_ANALYSIS,
            Self::Labeled(_) => Self::LABELED,
            Self::TestFailure(_) => Self::TEST_FAILURE,
            Self::TestMissing(_) => Self::TEST_MISSING,
            Self::UpdateError(_) => Self::UPDATE_ERROR,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BuildError(_) => BuildErrorTopic::DESCRIPTION,
            Self::BuildWarning(_) => BuildWarningTopic::DESCRIPTION,
            Self::Configure(_) => ConfigureTopic::DESCRIPTION,
            Self::DynamicAnalysis(_) => DynamicAnalysisTopic::DESCRIPTION,
            Self::Labeled(_) => LabeledTopic::DESCRIPTION,
            Self::TestFailure(_) => TestFailureTopic::DESCRIPTION,
            Self::TestMissing(_) => TestMissingTopic::DESCRIPTION,
            Self::UpdateError(_) => UpdateErrorTopic::DESCRIPTION,
        }
    }

    /// Matched items accumulated across every build this kind has seen.
    pub fn items(&self) -> &[TopicItem] {
        match self {
            Self::BuildError(t) => &t.items,
            Self::BuildWarning(t) => &t.items,
            Self::Configure(t) => &t.items,
            Self::DynamicAnalysis(t) => &t.items,
            Self::Labeled(t) => &t.items,
            Self::TestFailure(t) => &t.items,
            Self::TestMissing(t) => &t.items,
            Self::UpdateError(t) => &t.items,
        }
    }

    /// Cache this kind's matched items for one build. Returns how many
    /// items the build contributed; zero means the build does not belong
    /// to this topic.
    pub(crate) fn set_topic_data(
        &mut self,
        build: &Build,
        subscriber: Option<&dyn Subscriber>,
    ) -> usize {
        match self {
            Self::BuildError(t) => t.set_topic_data(build),
            Self::BuildWarning(t) => t.set_topic_data(build),
            Self::Configure(t) => t.set_topic_data(build),
            Self::DynamicAnalysis(t) => t.set_topic_data(build),
            Self::Labeled(t) => t.set_topic_data(build, subscriber),
            Self::TestFailure(t) => t.set_topic_data(build),
            Self::TestMissing(t) => t.set_topic_data(build),
            Self::UpdateError(t) => t.set_topic_data(build),
        }
    }

    /// Whether a single item carries this kind's subject.
    pub fn item_has_topic_subject(
        &self,
        build: &Build,
        item: &TopicItem,
        subscriber: Option<&dyn Subscriber>,
    ) -> bool {
        match self {
            Self::BuildError(_) => BuildErrorTopic::item_matches(build, item),
            Self::BuildWarning(_) => BuildWarningTopic::item_matches(build, item),
            Self::Configure(_) => ConfigureTopic::item_matches(build, item),
            Self::DynamicAnalysis(_) => DynamicAnalysisTopic::item_matches(build, item),
            Self::Labeled(_) => LabeledTopic::item_matches(build, item, subscriber),
            Self::TestFailure(_) => TestFailureTopic::item_matches(build, item),
            Self::TestMissing(_) => TestMissingTopic::item_matches(build, item),
            Self::UpdateError(_) => UpdateErrorTopic::item_matches(build, item),
        }
    }

    /// Labelable capability: `Some` only for kinds that report labels.
    pub fn labels(&self) -> Option<Vec<String>> {
        match self {
            Self::Labeled(t) => Some(t.labels()),
            _ => None,
        }
    }

    /// Fixable capability: `Some` only for kinds that track resolved items.
    pub fn fixed(&self) -> Option<&[TopicItem]> {
        match self {
            Self::BuildError(t) => Some(&t.fixed),
            Self::TestFailure(t) => Some(&t.fixed),
            _ => None,
        }
    }

    /// Message template fragments for this kind's notification section.
    pub fn template(&self) -> Vec<&'static str> {
        match self {
            Self::BuildError(_) => BuildErrorTopic::template(),
            Self::BuildWarning(_) => BuildWarningTopic::template(),
            Self::Configure(_) => ConfigureTopic::template(),
            Self::DynamicAnalysis(_) => DynamicAnalysisTopic::template(),
            Self::Labeled(_) => LabeledTopic::template(),
            Self::TestFailure(_) => TestFailureTopic::template(),
            Self::TestMissing(_) => TestMissingTopic::template(),
            Self::UpdateError(_) => UpdateErrorTopic::template(),
        }
    }
}

/// A node in the topic chain.
///
/// Built once (outermost node wrapping inward), then fed builds and
/// queried. A node with no kind is a neutral base: it accumulates nothing
/// of its own and answers every query with its inner node's answer or a
/// default.
pub struct Topic {
    kind: Option<TopicKind>,
    inner: Option<Box<Topic>>,
    builds: BuildCollection,
    evaluated: HashSet<i64>,
    subscriber: Option<Arc<dyn Subscriber>>,
}

impl Topic {
    pub fn new(kind: TopicKind) -> Self {
        Self {
            kind: Some(kind),
            inner: None,
            builds: BuildCollection::new(),
            evaluated: HashSet::new(),
            subscriber: None,
        }
    }

    /// A neutral node with no predicate of its own.
    pub fn base() -> Self {
        Self {
            kind: None,
            inner: None,
            builds: BuildCollection::new(),
            evaluated: HashSet::new(),
            subscriber: None,
        }
    }

    /// Wrap an inner node. Chains are assembled outermost-first and never
    /// restructured afterward.
    pub fn with_inner(mut self, inner: Topic) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    pub fn kind(&self) -> Option<&TopicKind> {
        self.kind.as_ref()
    }

    pub fn inner(&self) -> Option<&Topic> {
        self.inner.as_deref()
    }

    pub fn subscriber(&self) -> Option<&dyn Subscriber> {
        self.subscriber.as_deref()
    }

    /// Evaluate one build against this node and cascade inward, exactly
    /// once per node. A build this node has already evaluated is skipped
    /// locally but still cascades.
    pub fn add_build(&mut self, build: &Arc<Build>) -> &mut Self {
        if self.evaluated.insert(build.id) {
            if let Some(kind) = self.kind.as_mut() {
                let matched = kind.set_topic_data(build, self.subscriber.as_deref());
                if matched > 0 {
                    tracing::debug!(
                        build_id = build.id,
                        topic = kind.name(),
                        matched,
                        "build matched topic"
                    );
                    crate::metrics::build_classified(kind.name());
                    self.builds.add(Arc::clone(build));
                }
            }
        }
        if let Some(inner) = self.inner.as_mut() {
            inner.add_build(build);
        }
        self
    }

    /// Assign the subscriber to this node and every inner node. Must run
    /// before any notified-state check.
    pub fn set_subscriber(&mut self, subscriber: Arc<dyn Subscriber>) -> &mut Self {
        if let Some(inner) = self.inner.as_mut() {
            inner.set_subscriber(Arc::clone(&subscriber));
        }
        self.subscriber = Some(subscriber);
        self
    }

    /// This node's predicate when it has a kind, otherwise the inner
    /// node's answer, otherwise `false`.
    pub fn item_has_topic_subject(&self, build: &Build, item: &TopicItem) -> bool {
        match &self.kind {
            Some(kind) => kind.item_has_topic_subject(build, item, self.subscriber.as_deref()),
            None => self
                .inner
                .as_deref()
                .is_some_and(|inner| inner.item_has_topic_subject(build, item)),
        }
    }

    /// Matched items of the nearest kind-bearing node, searching inward.
    pub fn topic_collection(&self) -> &[TopicItem] {
        match &self.kind {
            Some(kind) => kind.items(),
            None => self
                .inner
                .as_deref()
                .map_or(&[], |inner| inner.topic_collection()),
        }
    }

    pub fn topic_name(&self) -> &'static str {
        match &self.kind {
            Some(kind) => kind.name(),
            None => self.inner.as_deref().map_or("", |inner| inner.topic_name()),
        }
    }

    pub fn topic_description(&self) -> &'static str {
        match &self.kind {
            Some(kind) => kind.description(),
            None => self
                .inner
                .as_deref()
                .map_or("", |inner| inner.topic_description()),
        }
    }

    /// This node's own accumulated builds, never an inner node's.
    pub fn build_collection(&self) -> &BuildCollection {
        &self.builds
    }

    /// Labels reported by the nearest label-capable node.
    pub fn labels(&self) -> Vec<String> {
        if let Some(labels) = self.kind.as_ref().and_then(TopicKind::labels) {
            return labels;
        }
        self.inner
            .as_deref()
            .map_or_else(Vec::new, |inner| inner.labels())
    }

    /// Matched-item count of the nearest kind-bearing node.
    pub fn topic_count(&self) -> usize {
        match &self.kind {
            Some(kind) => kind.items().len(),
            None => self.inner.as_deref().map_or(0, |inner| inner.topic_count()),
        }
    }

    /// Whether the assigned subscriber already appears in the build's
    /// notification history, optionally narrowed to one category.
    ///
    /// Refuses with [`NotifyError::SubscriberNotSet`] when no subscriber
    /// has been assigned: silently answering `false` would let duplicate
    /// notifications through.
    pub fn has_subscriber_already_been_notified(
        &self,
        build: &Build,
        category: Option<&str>,
    ) -> Result<bool, NotifyError> {
        let subscriber = self
            .subscriber
            .as_deref()
            .ok_or_else(|| NotifyError::SubscriberNotSet {
                topic: self.topic_name().to_string(),
            })?;
        let address = subscriber.address();

        let notified = match category {
            Some(category) => build
                .notifications
                .sort_by_category()
                .get(category)
                .is_some_and(|records| records.has(address)),
            None => build.notifications.has(address),
        };
        Ok(notified)
    }

    /// Resolved items reported by the nearest fix-capable node.
    pub fn fixed(&self) -> &[TopicItem] {
        if let Some(fixed) = self.kind.as_ref().and_then(TopicKind::fixed) {
            return fixed;
        }
        self.inner.as_deref().map_or(&[], |inner| inner.fixed())
    }

    /// Template fragments of the nearest kind-bearing node.
    pub fn template(&self) -> Vec<&'static str> {
        match &self.kind {
            Some(kind) => kind.template(),
            None => self
                .inner
                .as_deref()
                .map_or_else(Vec::new, |inner| inner.template()),
        }
    }

    /// Iterate this node and every inner node, outermost first.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { next: Some(self) }
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("kind", &self.kind)
            .field("builds", &self.builds.len())
            .field("subscriber", &self.subscriber.as_deref().map(|s| s.address()))
            .field("inner", &self.inner)
            .finish()
    }
}

/// Outermost-first iterator over a chain's nodes.
pub struct Nodes<'a> {
    next: Option<&'a Topic>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Topic;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.inner.as_deref();
        Some(node)
    }
}
