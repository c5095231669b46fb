//! A completed build submission with its loaded associations.
//!
//! Immutable once handed to the topic chain. Parent links form the
//! sub-project hierarchy; each build has at most one immediate parent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::alert::{AlertKind, BuildAlert};
use crate::models::configure::Configure;
use crate::models::dynamic_analysis::DynamicAnalysis;
use crate::models::notification::NotificationCollection;
use crate::models::test_record::TestRecord;
use crate::models::update::BuildUpdate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    pub id: i64,
    pub uuid: String,
    pub site_id: i64,
    pub project_id: i64,
    pub parent_id: Option<i64>,
    pub project_name: String,
    pub name: String,
    /// Submission stamp, e.g. "20260805-0100-Nightly".
    pub stamp: String,
    pub build_type: String,
    pub generator: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub submit_time: DateTime<Utc>,
    pub configure_errors: u32,
    pub configure_warnings: u32,
    pub build_errors: u32,
    pub build_warnings: u32,
    pub test_failed: u32,
    pub test_passed: u32,
    pub test_not_run: u32,
    pub done: bool,
    pub notified: bool,
    pub alerts: Vec<BuildAlert>,
    pub configure: Option<Configure>,
    pub dynamic_analyses: Vec<DynamicAnalysis>,
    pub tests: Vec<TestRecord>,
    pub update: Option<BuildUpdate>,
    pub labels: Vec<String>,
    /// Notifications previously sent for this build.
    pub notifications: NotificationCollection,
    /// Immediate parent in the sub-project hierarchy.
    #[serde(skip)]
    pub parent: Option<Arc<Build>>,
}

impl Build {
    pub fn new(id: i64, project_name: impl Into<String>, name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        let name = name.into();
        let now = Utc::now();
        let stamp = now.format("%Y%m%d-%H%M-Experimental").to_string();
        let uuid = Self::generate_uuid(&stamp, &name, 0, 0);

        Self {
            id,
            uuid,
            site_id: 0,
            project_id: 0,
            parent_id: None,
            project_name,
            name,
            stamp,
            build_type: "Experimental".to_string(),
            generator: String::new(),
            start_time: now,
            end_time: now,
            submit_time: now,
            configure_errors: 0,
            configure_warnings: 0,
            build_errors: 0,
            build_warnings: 0,
            test_failed: 0,
            test_passed: 0,
            test_not_run: 0,
            done: false,
            notified: false,
            alerts: Vec::new(),
            configure: None,
            dynamic_analyses: Vec::new(),
            tests: Vec::new(),
            update: None,
            labels: Vec::new(),
            notifications: NotificationCollection::new(),
            parent: None,
        }
    }

    /// Deterministic build fingerprint over the fields that identify a
    /// submission slot (stamp, build name, site, project).
    pub fn generate_uuid(stamp: &str, name: &str, site_id: i64, project_id: i64) -> String {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(format!("{stamp}_{name}_{site_id}_{project_id}").as_bytes());
        hex::encode(&hash[..16])
    }

    /// Error-kind alerts, in submission order.
    pub fn errors(&self) -> impl Iterator<Item = &BuildAlert> {
        self.alerts.iter().filter(|a| a.kind == AlertKind::Error)
    }

    /// Warning-kind alerts, in submission order.
    pub fn warnings(&self) -> impl Iterator<Item = &BuildAlert> {
        self.alerts.iter().filter(|a| a.kind == AlertKind::Warning)
    }
}
