//! Configure step outcome for a build.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configure {
    /// Exit status of the configure command.
    pub status: i32,
    pub errors: u32,
    pub warnings: u32,
    pub command: String,
    pub log_excerpt: Option<String>,
}

impl Configure {
    pub fn failed(&self) -> bool {
        self.status != 0 || self.errors > 0
    }
}
