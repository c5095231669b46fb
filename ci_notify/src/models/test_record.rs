//! Per-test outcomes attached to a build.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    NotRun,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: i64,
    pub name: String,
    pub status: TestStatus,
    pub details: Option<String>,
}

impl TestRecord {
    pub fn new(id: i64, name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            details: None,
        }
    }
}
