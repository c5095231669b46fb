//! Dynamic analysis results (sanitizers, valgrind-style checkers).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicAnalysisStatus {
    Passed,
    Failed,
    NotRun,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicAnalysis {
    pub id: i64,
    /// Checker that produced the result (e.g. "AddressSanitizer").
    pub checker: String,
    pub name: String,
    pub status: DynamicAnalysisStatus,
    pub defect_count: u32,
}
