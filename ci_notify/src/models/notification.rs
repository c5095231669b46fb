//! Per-build notification history — who has already been notified, and
//! under which topic category. The chain only reads this; the delivery
//! pipeline records into it after a successful send.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Topic category the notification covered (e.g. "BuildError").
    pub category: String,
    /// Recipient address.
    pub address: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationCollection {
    records: Vec<NotificationRecord>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: NotificationRecord) {
        self.records.push(record);
    }

    /// True if any record, regardless of category, names this address.
    pub fn has(&self, address: &str) -> bool {
        self.records.iter().any(|r| r.address == address)
    }

    /// Group records into per-category sub-collections.
    pub fn sort_by_category(&self) -> BTreeMap<String, NotificationCollection> {
        let mut grouped: BTreeMap<String, NotificationCollection> = BTreeMap::new();
        for record in &self.records {
            grouped
                .entry(record.category.clone())
                .or_default()
                .add(record.clone());
        }
        grouped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NotificationRecord> {
        self.records.iter()
    }
}
