//! Composes notifications from an evaluated topic chain.
//!
//! The chain classifies and aggregates; this service renders the result
//! into one notification per subscriber and hands it to a
//! [`NotificationSink`]. Delivery mechanics (SMTP, webhooks) live behind
//! the sink, outside this crate.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::NotifyConfig;
use crate::error::NotifyError;
use crate::models::build::Build;
use crate::topics::{Topic, TopicKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Topic categories covered, used when recording notification history.
    pub categories: Vec<String>,
}

impl Notification {
    /// Structured projection for JSON sinks.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "recipient": self.recipient,
            "subject": self.subject,
            "body": self.body,
            "categories": self.categories,
        })
    }
}

/// Delivery boundary. Implementations send the notification and report
/// failures; they never mutate build data.
pub trait NotificationSink {
    fn send(&mut self, notification: &Notification) -> anyhow::Result<()>;
}

/// Compose a notification from an evaluated chain, skipping builds whose
/// history shows the subscriber was already notified under a topic's
/// category. Returns `Ok(None)` when there is nothing new to report.
pub fn compose(chain: &Topic, config: &NotifyConfig) -> anyhow::Result<Option<Notification>> {
    let recipient = chain
        .subscriber()
        .ok_or_else(|| NotifyError::SubscriberNotSet {
            topic: chain.topic_name().to_string(),
        })?
        .address()
        .to_string();

    let mut sections = Vec::new();
    let mut categories = Vec::new();
    let mut summary_parts = Vec::new();
    let mut lead_build: Option<Arc<Build>> = None;

    for node in chain.nodes() {
        let Some(kind) = node.kind() else { continue };

        let mut fresh: Vec<&Arc<Build>> = Vec::new();
        for build in node.build_collection() {
            if chain.has_subscriber_already_been_notified(build, Some(kind.name()))? {
                tracing::debug!(
                    build_id = build.id,
                    topic = kind.name(),
                    recipient = %recipient,
                    "subscriber already notified, skipping build"
                );
                crate::metrics::notification_skipped("already_notified");
            } else {
                fresh.push(build);
            }
        }

        let fixed = kind.fixed().unwrap_or_default();
        if fresh.is_empty() && fixed.is_empty() {
            continue;
        }

        if lead_build.is_none() {
            lead_build = fresh.first().map(|b| Arc::clone(b));
        }
        if !fresh.is_empty() {
            summary_parts.push(format!("{}={}", short_code(kind.name()), kind.items().len()));
        }
        sections.push(render_section(kind, &fresh, config));
        categories.push(kind.name().to_string());
    }

    if sections.is_empty() {
        return Ok(None);
    }

    let subject = compose_subject(&summary_parts, lead_build.as_deref(), config);
    let mut body = sections.join("\n\n");
    body.push_str(&format!("\n\nDetails: {}", config.dashboard_url));

    crate::metrics::notification_composed(categories.len());
    tracing::info!(
        recipient = %recipient,
        topics = categories.len(),
        "notification composed"
    );

    Ok(Some(Notification {
        id: Uuid::new_v4(),
        recipient,
        subject,
        body,
        categories,
    }))
}

/// Compose and send in one step. Returns whether anything was sent.
pub fn dispatch(
    chain: &Topic,
    config: &NotifyConfig,
    sink: &mut dyn NotificationSink,
) -> anyhow::Result<bool> {
    match compose(chain, config)? {
        Some(notification) => {
            sink.send(&notification)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn render_section(kind: &TopicKind, fresh: &[&Arc<Build>], config: &NotifyConfig) -> String {
    let items = kind.items();
    let listed: Vec<String> = items
        .iter()
        .take(config.max_items)
        .map(|item| format!("- {}", item.describe()))
        .collect();
    let omitted = items.len().saturating_sub(config.max_items);
    let build_names: Vec<&str> = fresh.iter().map(|b| b.name.as_str()).collect();
    let labels = kind.labels().unwrap_or_default();

    let mut text = kind
        .template()
        .join("\n")
        .replace("{count}", &items.len().to_string())
        .replace("{builds}", &build_names.join(", "))
        .replace("{items}", &listed.join("\n"))
        .replace("{labels}", &labels.join(", "));

    if omitted > 0 {
        text.push_str(&format!("\n({omitted} more not shown)"));
    }
    let fixed = kind.fixed().unwrap_or_default();
    if !fixed.is_empty() {
        text.push_str(&format!(
            "\n{} previously failing item(s) resolved",
            fixed.len()
        ));
    }
    text
}

fn compose_subject(
    summary_parts: &[String],
    lead_build: Option<&Build>,
    config: &NotifyConfig,
) -> String {
    let scope = match lead_build {
        Some(build) => format!("{} - {}", build.project_name, build.name),
        None => "previously failing items resolved".to_string(),
    };
    let mut subject = if summary_parts.is_empty() {
        format!("PASSED ({scope})")
    } else {
        format!("FAILED ({}): {scope}", summary_parts.join(", "))
    };

    if subject.chars().count() > config.max_subject_chars {
        subject = subject
            .chars()
            .take(config.max_subject_chars.saturating_sub(3))
            .collect::<String>()
            + "...";
    }
    subject
}

fn short_code(topic: &str) -> &'static str {
    match topic {
        TopicKind::BUILD_ERROR => "e",
        TopicKind::BUILD_WARNING => "w",
        TopicKind::CONFIGURE => "c",
        TopicKind::DYNAMIC_ANALYSIS => "d",
        TopicKind::LABELED => "l",
        TopicKind::TEST_FAILURE => "t",
        TopicKind::TEST_MISSING => "m",
        TopicKind::UPDATE_ERROR => "u",
        _ => "?",
    }
}
