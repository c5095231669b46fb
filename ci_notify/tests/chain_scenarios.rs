//! End-to-end topic chain scenarios: classification, de-duplication,
//! label aggregation, fixed-item reporting, and notification composition.

use std::sync::Arc;

use ci_notify::config::NotifyConfig;
use ci_notify::models::alert::BuildAlert;
use ci_notify::models::build::Build;
use ci_notify::models::notification::NotificationRecord;
use ci_notify::models::subscriber::{EmailSubscriber, Subscriber};
use ci_notify::models::test_record::{TestRecord, TestStatus};
use ci_notify::services::{self, Notification, NotificationSink};
use ci_notify::topics::factory::{build_chain, SubscriptionPreferences};
use ci_notify::topics::{Topic, TopicKind};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

fn subscriber(address: &str) -> Arc<dyn Subscriber> {
    Arc::new(EmailSubscriber::new(address))
}

#[test]
fn error_chain_classifies_only_matching_nodes() {
    init_tracing();

    let mut chain = Topic::new(TopicKind::build_error())
        .with_inner(Topic::new(TopicKind::build_warning()).with_inner(Topic::base()));

    let mut build = Build::new(1, "Dashboard", "linux-gcc");
    build.alerts.push(BuildAlert::error("undefined reference"));
    build.alerts.push(BuildAlert::error("expected `;`"));
    build.build_errors = 2;
    let build = Arc::new(build);

    chain.add_build(&build);

    assert!(chain.build_collection().has(1));
    assert_eq!(chain.topic_count(), 2);

    let warning_node = chain.inner().unwrap();
    assert!(warning_node.build_collection().is_empty());
}

#[test]
fn repeated_builds_count_once() {
    let mut chain = Topic::new(TopicKind::build_error());
    let mut build = Build::new(9, "Dashboard", "linux-gcc");
    build.alerts.push(BuildAlert::error("boom"));
    let build = Arc::new(build);

    chain.add_build(&build).add_build(&build).add_build(&build);

    assert_eq!(chain.build_collection().len(), 1);
    assert_eq!(chain.topic_count(), 1);
}

#[test]
fn full_chain_routes_each_build_to_its_topic() {
    init_tracing();

    let mut chain = build_chain(&SubscriptionPreferences::all()).unwrap();

    let mut erroring = Build::new(1, "Dashboard", "linux-gcc");
    erroring.alerts.push(BuildAlert::error("link failure"));
    let erroring = Arc::new(erroring);

    let mut failing_tests = Build::new(2, "Dashboard", "linux-clang");
    failing_tests
        .tests
        .push(TestRecord::new(1, "math.add", TestStatus::Failed));
    let failing_tests = Arc::new(failing_tests);

    let clean = Arc::new(Build::new(3, "Dashboard", "macos-clang"));

    chain
        .add_build(&erroring)
        .add_build(&failing_tests)
        .add_build(&clean);

    for node in chain.nodes() {
        let name = node.kind().unwrap().name();
        match name {
            "BuildError" => {
                assert!(node.build_collection().has(1));
                assert_eq!(node.build_collection().len(), 1);
            }
            "TestFailure" => {
                assert!(node.build_collection().has(2));
                assert_eq!(node.build_collection().len(), 1);
            }
            _ => assert!(node.build_collection().is_empty(), "{name} should be empty"),
        }
    }
}

#[test]
fn shared_labels_are_reported_once() {
    let mut chain = Topic::new(TopicKind::labeled());

    let mut first = Build::new(1, "Dashboard", "linux-gcc");
    first.labels.push("flaky".to_string());
    let mut second = Build::new(2, "Dashboard", "linux-clang");
    second.labels.push("flaky".to_string());

    chain.add_build(&Arc::new(first)).add_build(&Arc::new(second));

    assert_eq!(chain.labels(), vec!["flaky"]);
    assert_eq!(chain.build_collection().len(), 2);
}

#[test]
fn resolved_parent_failures_surface_as_fixed() {
    let mut parent = Build::new(10, "Dashboard", "linux-gcc");
    for (id, name) in [(1, "io.read"), (2, "io.write"), (3, "io.seek")] {
        parent.tests.push(TestRecord::new(id, name, TestStatus::Failed));
    }
    parent.test_failed = 3;

    let mut current = Build::new(11, "Dashboard", "linux-gcc");
    for (id, name) in [(4, "io.read"), (5, "io.write"), (6, "io.seek")] {
        current.tests.push(TestRecord::new(id, name, TestStatus::Passed));
    }
    current.parent_id = Some(10);
    current.parent = Some(Arc::new(parent));
    let current = Arc::new(current);

    let mut chain = Topic::new(TopicKind::test_failure());
    chain.add_build(&current);

    // Nothing currently failing, so the build is not collected...
    assert!(chain.build_collection().is_empty());
    // ...but the three resolved tests are reported.
    assert_eq!(chain.fixed().len(), 3);
}

#[test]
fn notified_subscribers_are_filtered_per_category() {
    let mut build = Build::new(1, "Dashboard", "linux-gcc");
    build.alerts.push(BuildAlert::error("boom"));
    build.notifications.add(NotificationRecord {
        category: "BuildError".to_string(),
        address: "dev@example.com".to_string(),
        sent_at: chrono::Utc::now(),
    });
    let build = Arc::new(build);

    let mut chain = Topic::new(TopicKind::build_error());
    chain.set_subscriber(subscriber("dev@example.com"));
    chain.add_build(&build);

    assert!(chain
        .has_subscriber_already_been_notified(&build, Some("BuildError"))
        .unwrap());
    assert!(!chain
        .has_subscriber_already_been_notified(&build, Some("TestFailure"))
        .unwrap());

    // Already notified for the only matching category: nothing to send.
    assert!(services::compose(&chain, &NotifyConfig::default())
        .unwrap()
        .is_none());

    // A different subscriber still gets the notification.
    let mut chain = Topic::new(TopicKind::build_error());
    chain.set_subscriber(subscriber("lead@example.com"));
    chain.add_build(&build);

    let notification = services::compose(&chain, &NotifyConfig::default())
        .unwrap()
        .expect("notification expected");
    assert_eq!(notification.recipient, "lead@example.com");
}

#[test]
fn dispatch_delivers_through_the_sink() {
    init_tracing();

    #[derive(Default)]
    struct MemorySink {
        sent: Vec<Notification>,
    }

    impl NotificationSink for MemorySink {
        fn send(&mut self, notification: &Notification) -> anyhow::Result<()> {
            self.sent.push(notification.clone());
            Ok(())
        }
    }

    let mut chain = build_chain(&SubscriptionPreferences {
        build_errors: true,
        test_failures: true,
        ..Default::default()
    })
    .unwrap();
    chain.set_subscriber(subscriber("dev@example.com"));

    let mut build = Build::new(1, "Dashboard", "linux-gcc");
    build.alerts.push(BuildAlert::error("undefined reference"));
    chain.add_build(&Arc::new(build));

    let mut sink = MemorySink::default();
    let sent = services::dispatch(&chain, &NotifyConfig::default(), &mut sink).unwrap();

    assert!(sent);
    assert_eq!(sink.sent.len(), 1);
    assert_eq!(sink.sent[0].categories, vec!["BuildError"]);
    assert!(sink.sent[0].subject.starts_with("FAILED (e=1)"));
}
