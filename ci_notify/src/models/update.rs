//! Source update (checkout) outcome for a build.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    Clean,
    Updated,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildUpdate {
    pub revision: String,
    pub prior_revision: Option<String>,
    pub status: UpdateStatus,
    /// Files changed by the update, when the checkout succeeded.
    pub files: Vec<String>,
}
